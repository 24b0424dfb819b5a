use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use validator::Validate;

/// Store-assigned user identifier. Zero marks a user that has not been persisted yet.
pub type UserId = i32;

/// Role of a user in the system
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_role")]
pub enum UserRole {
    #[default]
    #[sea_orm(string_value = "customer")]
    Customer,
    #[sea_orm(string_value = "driver")]
    Driver,
    #[sea_orm(string_value = "provider")]
    Provider,
    #[sea_orm(string_value = "backoffice_manager")]
    BackofficeManager,
    #[sea_orm(string_value = "administrator")]
    Administrator,
}

/// Account status of a user
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    DeriveActiveEnum,
    EnumIter,
)]
#[sea_orm(rs_type = "String", db_type = "Enum", enum_name = "user_status")]
pub enum UserStatus {
    #[default]
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "inactive")]
    Inactive,
}

/// User entity exposed by the directory
///
/// `password_hash` is write-only: set it to change credentials on save, every
/// read returns `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct User {
    /// Unique identifier, `0` until the user is created
    #[serde(default)]
    pub id: UserId,
    /// Unique login name
    #[serde(rename = "name")]
    #[validate(length(min = 1, max = 25, message = "The name must be set and at most 25 characters long"))]
    pub user_name: String,
    /// Output of [`crate::hasher::password_hash`]
    #[serde(rename = "passwordhash", default, skip_serializing_if = "Option::is_none")]
    #[validate(length(max = 128, message = "The password hash must be at most 128 characters long"))]
    pub password_hash: Option<String>,
    #[validate(length(max = 320, message = "The email must be at most 320 characters long"))]
    pub email: String,
    pub role: UserRole,
    pub status: UserStatus,
}

impl User {
    /// Create a transient user (id `0`, no credentials)
    pub fn new(
        user_name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
        status: UserStatus,
    ) -> Self {
        Self {
            id: 0,
            user_name: user_name.into(),
            password_hash: None,
            email: email.into(),
            role,
            status,
        }
    }

    pub fn with_password_hash(mut self, password_hash: impl Into<String>) -> Self {
        self.password_hash = Some(password_hash.into());
        self
    }

    /// Whether this value has never been persisted
    pub fn is_transient(&self) -> bool {
        self.id == 0
    }
}

/// Storage-layer shape of a user, including the password hash
///
/// On writes a `None` hash leaves the stored credentials untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub user_name: String,
    pub email: String,
    pub password_hash: Option<String>,
    pub role: UserRole,
    pub status: UserStatus,
}

impl UserRecord {
    /// Map a caller's user onto the record written to the store
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            user_name: user.user_name.clone(),
            email: user.email.clone(),
            password_hash: user.password_hash.clone().filter(|hash| !hash.is_empty()),
            role: user.role,
            status: user.status,
        }
    }
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            user_name: record.user_name,
            password_hash: None,
            email: record.email,
            role: record.role,
            status: record.status,
        }
    }
}

/// Filters shared by listing and counting users
///
/// `name` accepts an exact name or a pattern with `*` at the start and/or the
/// end, see [`crate::filter::NameMatch`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
}

impl UserFilter {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn with_status(mut self, status: UserStatus) -> Self {
        self.status = Some(status);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_record_from_user_drops_empty_hash() {
        let user = User::new("user1", "user1@domain.com", UserRole::Driver, UserStatus::Active)
            .with_password_hash("");
        assert_eq!(UserRecord::from_user(&user).password_hash, None);

        let user = user.with_password_hash("hash");
        assert_eq!(
            UserRecord::from_user(&user).password_hash.as_deref(),
            Some("hash")
        );
    }

    #[test]
    fn test_user_from_record_clears_hash() {
        let record = UserRecord {
            id: 7,
            user_name: "user7".to_string(),
            email: "user7@domain.com".to_string(),
            password_hash: Some("stored".to_string()),
            role: UserRole::Administrator,
            status: UserStatus::Inactive,
        };

        let user = User::from(record);
        assert_eq!(user.id, 7);
        assert_eq!(user.user_name, "user7");
        assert_eq!(user.password_hash, None);
        assert_eq!(user.role, UserRole::Administrator);
        assert_eq!(user.status, UserStatus::Inactive);
    }

    #[test]
    fn test_user_json_contract() {
        let user = User {
            id: 3,
            ..User::new("user3", "user3@domain.com", UserRole::BackofficeManager, UserStatus::Active)
        };

        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 3,
                "name": "user3",
                "email": "user3@domain.com",
                "role": "BackofficeManager",
                "status": "Active"
            })
        );

        let parsed: User = serde_json::from_value(serde_json::json!({
            "name": "user4",
            "passwordhash": "abc",
            "email": "",
            "role": "Provider",
            "status": "Inactive"
        }))
        .unwrap();
        assert!(parsed.is_transient());
        assert_eq!(parsed.password_hash.as_deref(), Some("abc"));
        assert_eq!(parsed.role, UserRole::Provider);
    }

    #[test]
    fn test_user_validation_limits() {
        let user = User::new("", "", UserRole::Customer, UserStatus::Active);
        assert!(user.validate().is_err());

        let user = User::new("a".repeat(25), "", UserRole::Customer, UserStatus::Active);
        assert!(user.validate().is_ok());

        let user = User::new("a".repeat(26), "", UserRole::Customer, UserStatus::Active);
        assert!(user.validate().is_err());

        let user = User::new("user", "e".repeat(321), UserRole::Customer, UserStatus::Active);
        assert!(user.validate().is_err());
    }

    #[test]
    fn test_role_round_trips_through_names() {
        assert_eq!(UserRole::BackofficeManager.to_string(), "BackofficeManager");
        assert_eq!(
            UserRole::from_str("Administrator").unwrap(),
            UserRole::Administrator
        );
        assert!(UserStatus::from_str("Deleted").is_err());
    }
}
