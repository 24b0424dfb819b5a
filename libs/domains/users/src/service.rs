use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{Operation, StoreError, UserError, UserResult};
use crate::hasher::hashes_match;
use crate::models::{User, UserFilter, UserId, UserRecord};
use crate::repository::UserRepository;

/// Largest page `get_users` will return
pub const MAX_PAGE_SIZE: u64 = 500;

/// User directory: validation and invariants on top of a [`UserRepository`]
///
/// Every store failure is reported as [`UserError::Directory`] tagged with
/// the operation that was attempted. Lookups that find nothing return `None`.
#[derive(Clone)]
pub struct UserDirectory<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserDirectory<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Get a user by ID
    #[instrument(skip(self))]
    pub async fn get(&self, id: UserId) -> UserResult<Option<User>> {
        let record = self
            .repository
            .get_by_id(id)
            .await
            .map_err(|e| e.into_directory(Operation::Get))?;

        Ok(record.map(User::from))
    }

    /// Find a user by exact name. An empty name matches nobody.
    #[instrument(skip(self))]
    pub async fn find(&self, user_name: &str) -> UserResult<Option<User>> {
        let record = self
            .repository
            .find_by_name(user_name)
            .await
            .map_err(|e| e.into_directory(Operation::Find))?;

        Ok(record.map(User::from))
    }

    /// Return the user if `password_hash` matches the stored hash
    ///
    /// Unknown names and wrong hashes both yield `None`. The account status
    /// is not consulted; gating inactive users is up to the caller.
    #[instrument(skip(self, password_hash))]
    pub async fn validate_password(
        &self,
        user_name: &str,
        password_hash: &str,
    ) -> UserResult<Option<User>> {
        let wrap = |e: StoreError| e.into_directory(Operation::ValidatePassword);

        let Some(record) = self.repository.find_by_name(user_name).await.map_err(wrap)? else {
            return Ok(None);
        };

        let Some(stored) = self
            .repository
            .get_password_hash(record.id)
            .await
            .map_err(wrap)?
        else {
            return Ok(None);
        };

        if !hashes_match(&stored, password_hash) {
            tracing::debug!(user_id = record.id, "Password hash mismatch");
            return Ok(None);
        }

        Ok(Some(record.into()))
    }

    /// Create or update a user
    ///
    /// A transient user (id `0`) is created and gets its new id written back.
    /// A persisted user is updated in place, or recreated under a new id if its
    /// record has disappeared. The stored password hash only changes when
    /// `user.password_hash` is non-empty.
    #[instrument(skip_all, fields(user_id = user.id, user_name = %user.user_name))]
    pub async fn save(&self, user: &mut User) -> UserResult<()> {
        if user.user_name.is_empty() {
            return Err(UserError::invalid_argument("user", "The name must be set"));
        }
        validate_fields(user)?;

        let taken = self
            .repository
            .exists_with_name_excluding(&user.user_name, user.id)
            .await
            .map_err(|e| e.into_directory(Operation::Save))?;
        if taken {
            tracing::debug!("Rejected save of duplicate user name");
            return Err(UserError::NameConflict(user.user_name.clone()));
        }

        let id = self
            .repository
            .upsert(UserRecord::from_user(user))
            .await
            .map_err(|e| match e {
                // Lost a race against a concurrent writer
                StoreError::UniqueViolation(_) => UserError::NameConflict(user.user_name.clone()),
                other => other.into_directory(Operation::Save),
            })?;

        user.id = id;
        Ok(())
    }

    /// Delete a persisted user. Deleting a user that no longer exists is a no-op.
    #[instrument(skip_all, fields(user_id = user.id))]
    pub async fn delete(&self, user: &User) -> UserResult<()> {
        if user.is_transient() {
            return Err(UserError::invalid_argument(
                "user",
                "The user must have a non-zero id",
            ));
        }

        let deleted = self
            .repository
            .delete(user.id)
            .await
            .map_err(|e| e.into_directory(Operation::Delete))?;

        if !deleted {
            tracing::debug!("Delete of absent user ignored");
        }
        Ok(())
    }

    /// Create many users in one store transaction, assigning every id
    ///
    /// Unlike [`save`](Self::save) there is no name pre-check: duplicates in
    /// the batch or against existing users are rejected by the store and the
    /// whole batch fails as a directory error.
    #[instrument(skip_all, fields(count = users.len()))]
    pub async fn mass_create(&self, users: &mut [User]) -> UserResult<()> {
        for user in users.iter() {
            validate_fields(user)?;
        }

        let records = users.iter().map(UserRecord::from_user).collect();
        let ids = self
            .repository
            .insert_many(records)
            .await
            .map_err(|e| e.into_directory(Operation::MassCreate))?;

        for (user, id) in users.iter_mut().zip(ids) {
            user.id = id;
        }
        Ok(())
    }

    /// List users ordered by name, at most [`MAX_PAGE_SIZE`] per call
    #[instrument(skip(self))]
    pub async fn get_users(
        &self,
        filter: &UserFilter,
        skip: u64,
        take: u64,
    ) -> UserResult<Vec<User>> {
        if take > MAX_PAGE_SIZE {
            return Err(UserError::invalid_argument(
                "take",
                format!("The maximum number of users to return is {}", MAX_PAGE_SIZE),
            ));
        }

        let records = self
            .repository
            .scan(filter, skip, take)
            .await
            .map_err(|e| e.into_directory(Operation::GetUsers))?;

        Ok(records.into_iter().map(User::from).collect())
    }

    /// Count users matching the filter
    #[instrument(skip(self))]
    pub async fn count_users(&self, filter: &UserFilter) -> UserResult<u64> {
        self.repository
            .count(filter)
            .await
            .map_err(|e| e.into_directory(Operation::CountUsers))
    }
}

fn validate_fields(user: &User) -> UserResult<()> {
    user.validate()
        .map_err(|e| UserError::invalid_argument("user", e.to_string()))
}
