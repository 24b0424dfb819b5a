use async_trait::async_trait;
use sea_orm::sea_query::LikeExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Select, TransactionTrait,
};

use crate::{
    entity,
    error::StoreResult,
    filter::NameMatch,
    models::{UserFilter, UserId, UserRecord},
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository using SeaORM
///
/// Uniqueness of `user_name` is guaranteed by the table's unique index; a
/// concurrent writer losing the race gets `StoreError::UniqueViolation`.
#[derive(Clone)]
pub struct PgUserRepository {
    db: DatabaseConnection,
}

impl PgUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn filtered(filter: &UserFilter) -> Select<entity::Entity> {
        let mut query = entity::Entity::find();

        match filter.name_match() {
            NameMatch::Any => {}
            NameMatch::Exact(name) => {
                query = query.filter(entity::Column::UserName.eq(name));
            }
            // Leading wildcards cannot use the name index
            partial => {
                if let Some(pattern) = partial.like_pattern() {
                    query = query.filter(
                        entity::Column::UserName.like(LikeExpr::new(pattern).escape('\\')),
                    );
                }
            }
        }

        if let Some(email) = filter.email.as_deref().filter(|e| !e.is_empty()) {
            query = query.filter(entity::Column::Email.eq(email));
        }

        if let Some(role) = filter.role {
            query = query.filter(entity::Column::Role.eq(role));
        }

        if let Some(status) = filter.status {
            query = query.filter(entity::Column::Status.eq(status));
        }

        query
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_by_id(&self, id: UserId) -> StoreResult<Option<UserRecord>> {
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn find_by_name(&self, user_name: &str) -> StoreResult<Option<UserRecord>> {
        let model = entity::Entity::find()
            .filter(entity::Column::UserName.eq(user_name))
            .one(&self.db)
            .await?;
        Ok(model.map(Into::into))
    }

    async fn exists_with_name_excluding(
        &self,
        user_name: &str,
        exclude_id: UserId,
    ) -> StoreResult<bool> {
        let count = entity::Entity::find()
            .filter(entity::Column::UserName.eq(user_name))
            .filter(entity::Column::Id.ne(exclude_id))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    async fn get_password_hash(&self, id: UserId) -> StoreResult<Option<String>> {
        let hash: Option<Option<String>> = entity::Entity::find_by_id(id)
            .select_only()
            .column(entity::Column::PasswordHash)
            .into_tuple()
            .one(&self.db)
            .await?;
        Ok(hash.flatten())
    }

    async fn upsert(&self, record: UserRecord) -> StoreResult<UserId> {
        if record.id != 0 {
            let existing = entity::Entity::find_by_id(record.id).one(&self.db).await?;
            if existing.is_some() {
                let id = record.id;
                entity::ActiveModel::for_update(id, record)
                    .update(&self.db)
                    .await?;
                tracing::info!(user_id = id, "Updated user");
                return Ok(id);
            }
        }

        let model = entity::ActiveModel::for_insert(record)
            .insert(&self.db)
            .await?;
        tracing::info!(user_id = model.id, user_name = %model.user_name, "Created user");
        Ok(model.id)
    }

    async fn insert_many(&self, records: Vec<UserRecord>) -> StoreResult<Vec<UserId>> {
        let txn = self.db.begin().await?;

        let mut ids = Vec::with_capacity(records.len());
        for record in records {
            let model = entity::ActiveModel::for_insert(record).insert(&txn).await?;
            ids.push(model.id);
        }

        txn.commit().await?;

        tracing::info!(count = ids.len(), "Created users in bulk");
        Ok(ids)
    }

    async fn delete(&self, id: UserId) -> StoreResult<bool> {
        let result = entity::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected > 0 {
            tracing::info!(user_id = id, "Deleted user");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn scan(
        &self,
        filter: &UserFilter,
        skip: u64,
        take: u64,
    ) -> StoreResult<Vec<UserRecord>> {
        let models = Self::filtered(filter)
            .order_by_asc(entity::Column::UserName)
            .offset(skip)
            .limit(take)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn count(&self, filter: &UserFilter) -> StoreResult<u64> {
        Ok(Self::filtered(filter).count(&self.db).await?)
    }
}
