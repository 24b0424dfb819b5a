use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{StoreError, StoreResult};
use crate::models::{UserFilter, UserId, UserRecord};

/// Repository trait for user record persistence
///
/// Implementations keep a unique index on the user name and report its
/// violation as [`StoreError::UniqueViolation`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Get a record by ID
    async fn get_by_id(&self, id: UserId) -> StoreResult<Option<UserRecord>>;

    /// Get a record by its exact user name
    async fn find_by_name(&self, user_name: &str) -> StoreResult<Option<UserRecord>>;

    /// Check whether a record other than `exclude_id` holds `user_name`
    async fn exists_with_name_excluding(
        &self,
        user_name: &str,
        exclude_id: UserId,
    ) -> StoreResult<bool>;

    /// Stored password hash of a record, `None` if the record or hash is missing
    async fn get_password_hash(&self, id: UserId) -> StoreResult<Option<String>>;

    /// Update the record with `record.id` if it exists, insert otherwise.
    /// Returns the id of the written record.
    async fn upsert(&self, record: UserRecord) -> StoreResult<UserId>;

    /// Insert all records atomically, returning their ids in input order
    async fn insert_many(&self, records: Vec<UserRecord>) -> StoreResult<Vec<UserId>>;

    /// Delete a record by ID, returns whether a record was removed
    async fn delete(&self, id: UserId) -> StoreResult<bool>;

    /// Matching records ordered by user name ascending, comparing bytes
    /// (uppercase before lowercase, no locale collation)
    async fn scan(&self, filter: &UserFilter, skip: u64, take: u64)
    -> StoreResult<Vec<UserRecord>>;

    /// Count matching records
    async fn count(&self, filter: &UserFilter) -> StoreResult<u64>;
}

#[derive(Debug, Default)]
struct MemoryState {
    records: BTreeMap<UserId, UserRecord>,
    last_id: UserId,
}

impl MemoryState {
    fn name_taken(&self, user_name: &str, exclude_id: UserId) -> bool {
        self.records
            .values()
            .any(|r| r.id != exclude_id && r.user_name == user_name)
    }

    fn insert(&mut self, mut record: UserRecord) -> UserId {
        self.last_id += 1;
        record.id = self.last_id;
        self.records.insert(record.id, record);
        self.last_id
    }
}

/// In-memory implementation of UserRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<MemoryState>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_id(&self, id: UserId) -> StoreResult<Option<UserRecord>> {
        let state = self.state.read().await;
        Ok(state.records.get(&id).cloned())
    }

    async fn find_by_name(&self, user_name: &str) -> StoreResult<Option<UserRecord>> {
        let state = self.state.read().await;
        Ok(state
            .records
            .values()
            .find(|r| r.user_name == user_name)
            .cloned())
    }

    async fn exists_with_name_excluding(
        &self,
        user_name: &str,
        exclude_id: UserId,
    ) -> StoreResult<bool> {
        let state = self.state.read().await;
        Ok(state.name_taken(user_name, exclude_id))
    }

    async fn get_password_hash(&self, id: UserId) -> StoreResult<Option<String>> {
        let state = self.state.read().await;
        Ok(state.records.get(&id).and_then(|r| r.password_hash.clone()))
    }

    async fn upsert(&self, record: UserRecord) -> StoreResult<UserId> {
        let mut state = self.state.write().await;

        if state.name_taken(&record.user_name, record.id) {
            return Err(StoreError::UniqueViolation(record.user_name));
        }

        if let Some(existing) = state.records.get_mut(&record.id) {
            existing.user_name = record.user_name;
            existing.email = record.email;
            existing.role = record.role;
            existing.status = record.status;
            if record.password_hash.is_some() {
                existing.password_hash = record.password_hash;
            }

            tracing::info!(user_id = existing.id, "Updated user");
            return Ok(existing.id);
        }

        let user_name = record.user_name.clone();
        let id = state.insert(record);

        tracing::info!(user_id = id, user_name = %user_name, "Created user");
        Ok(id)
    }

    async fn insert_many(&self, records: Vec<UserRecord>) -> StoreResult<Vec<UserId>> {
        let mut state = self.state.write().await;

        // Reject the whole batch before writing anything
        for (i, record) in records.iter().enumerate() {
            let duplicated_in_batch = records[..i]
                .iter()
                .any(|r| r.user_name == record.user_name);
            if duplicated_in_batch || state.name_taken(&record.user_name, 0) {
                return Err(StoreError::UniqueViolation(record.user_name.clone()));
            }
        }

        let ids: Vec<UserId> = records
            .into_iter()
            .map(|record| state.insert(record))
            .collect();

        tracing::info!(count = ids.len(), "Created users in bulk");
        Ok(ids)
    }

    async fn delete(&self, id: UserId) -> StoreResult<bool> {
        let mut state = self.state.write().await;

        if state.records.remove(&id).is_some() {
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
        let state = self.state.read().await;

        let mut result: Vec<UserRecord> = state
            .records
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();

        result.sort_by(|a, b| a.user_name.cmp(&b.user_name));

        Ok(result
            .into_iter()
            .skip(usize::try_from(skip).unwrap_or(usize::MAX))
            .take(usize::try_from(take).unwrap_or(usize::MAX))
            .collect())
    }

    async fn count(&self, filter: &UserFilter) -> StoreResult<u64> {
        let state = self.state.read().await;
        Ok(state.records.values().filter(|r| filter.matches(r)).count() as u64)
    }
}
