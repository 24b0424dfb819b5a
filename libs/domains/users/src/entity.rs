use crate::models::{UserRecord, UserRole, UserStatus};
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::entity::prelude::*;

/// Sea-ORM Entity for the directory_users table
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "directory_users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub user_name: String,
    pub password_hash: Option<String>,
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for UserRecord {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_name: model.user_name,
            email: model.email,
            password_hash: model.password_hash,
            role: model.role,
            status: model.status,
        }
    }
}

impl ActiveModel {
    /// Active model inserting `record` under a database-generated id
    pub fn for_insert(record: UserRecord) -> Self {
        Self {
            id: NotSet,
            user_name: Set(record.user_name),
            password_hash: Set(record.password_hash),
            email: Set(record.email),
            role: Set(record.role),
            status: Set(record.status),
        }
    }

    /// Active model updating row `id`; a missing hash keeps the stored one
    pub fn for_update(id: i32, record: UserRecord) -> Self {
        Self {
            id: Set(id),
            user_name: Set(record.user_name),
            password_hash: match record.password_hash {
                Some(hash) => Set(Some(hash)),
                None => NotSet,
            },
            email: Set(record.email),
            role: Set(record.role),
            status: Set(record.status),
        }
    }
}
