use strum::{Display, EnumString};
use thiserror::Error;

/// Directory operation that failed, carried by [`UserError::Directory`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum Operation {
    Get,
    Find,
    ValidatePassword,
    Save,
    Delete,
    MassCreate,
    GetUsers,
    CountUsers,
}

#[derive(Debug, Error)]
pub enum UserError {
    /// The caller passed a value the directory rejects before touching storage
    #[error("Invalid argument '{argument}': {message}")]
    InvalidArgument {
        argument: &'static str,
        message: String,
    },

    /// Another persisted user already holds this name
    #[error("The name must be unique: '{0}' is already taken")]
    NameConflict(String),

    /// The store failed while serving an otherwise valid request
    #[error("User directory error {message} in operation {operation}")]
    Directory {
        operation: Operation,
        message: String,
    },
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    pub(crate) fn invalid_argument(argument: &'static str, message: impl Into<String>) -> Self {
        UserError::InvalidArgument {
            argument,
            message: message.into(),
        }
    }

    /// Caller errors: retrying with the same input fails the same way
    pub fn is_invalid_argument(&self) -> bool {
        matches!(
            self,
            UserError::InvalidArgument { .. } | UserError::NameConflict(_)
        )
    }

    /// Operational failures with an opaque cause, safe to retry with backoff
    pub fn is_retryable(&self) -> bool {
        matches!(self, UserError::Directory { .. })
    }

    /// The failed operation of a directory error
    pub fn operation(&self) -> Option<Operation> {
        match self {
            UserError::Directory { operation, .. } => Some(*operation),
            _ => None,
        }
    }
}

/// Failure reported by a [`crate::repository::UserRepository`]
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// The unique index on the user name rejected a write
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Database error: {0}")]
    Database(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        match err.sql_err() {
            Some(sea_orm::SqlErr::UniqueConstraintViolation(detail)) => {
                StoreError::UniqueViolation(detail)
            }
            _ => StoreError::Database(err.to_string()),
        }
    }
}

impl StoreError {
    /// Wrap into the directory error of `operation`
    pub(crate) fn into_directory(self, operation: Operation) -> UserError {
        tracing::warn!(%operation, error = %self, "User store failure");
        UserError::Directory {
            operation,
            message: self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_error_carries_operation() {
        let err = StoreError::Database("connection reset".to_string())
            .into_directory(Operation::GetUsers);

        assert_eq!(err.operation(), Some(Operation::GetUsers));
        assert!(err.is_retryable());
        assert!(!err.is_invalid_argument());
        assert_eq!(
            err.to_string(),
            "User directory error Database error: connection reset in operation GetUsers"
        );
    }

    #[test]
    fn test_caller_errors_are_not_retryable() {
        let err = UserError::invalid_argument("take", "too many");
        assert!(err.is_invalid_argument());
        assert!(!err.is_retryable());
        assert_eq!(err.operation(), None);

        let err = UserError::NameConflict("user1".to_string());
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("user1"));
    }

    #[test]
    fn test_operation_names() {
        assert_eq!(Operation::ValidatePassword.to_string(), "ValidatePassword");
        assert_eq!(Operation::MassCreate.to_string(), "MassCreate");
        assert_eq!("CountUsers".parse::<Operation>().unwrap(), Operation::CountUsers);
    }

    #[test]
    fn test_db_err_maps_to_database_variant() {
        let err: StoreError = sea_orm::DbErr::Custom("boom".to_string()).into();
        assert!(matches!(err, StoreError::Database(msg) if msg.contains("boom")));
    }
}
