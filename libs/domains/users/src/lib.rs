//! User Directory Domain
//!
//! Storage-backed directory of user accounts: lookup by id or name, password
//! verification, create/update with a unique-name guarantee, deletion, bulk
//! creation, and filtered paging.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │  UserDirectory  │  ← Validation, uniqueness pre-check, error wrapping
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │ UserRepository  │  ← Data access (trait + in-memory / PostgreSQL)
//! └────────┬────────┘
//!          │
//! ┌────────▼────────┐
//! │     Models      │  ← User, UserRecord, UserFilter, enums
//! └─────────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_users::{
//!     hasher::password_hash, InMemoryUserRepository, User, UserDirectory, UserRole, UserStatus,
//! };
//!
//! # async fn run() -> domain_users::UserResult<()> {
//! let directory = UserDirectory::new(InMemoryUserRepository::new());
//!
//! let mut user = User::new("alice", "alice@domain.com", UserRole::Driver, UserStatus::Active)
//!     .with_password_hash(password_hash("secret"));
//! directory.save(&mut user).await?;
//!
//! let found = directory.validate_password("alice", &password_hash("secret")).await?;
//! assert_eq!(found.map(|u| u.id), Some(user.id));
//! # Ok(())
//! # }
//! ```

pub mod entity;
pub mod error;
pub mod filter;
pub mod hasher;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{Operation, StoreError, UserError, UserResult};
pub use models::{User, UserFilter, UserId, UserRecord, UserRole, UserStatus};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use service::{MAX_PAGE_SIZE, UserDirectory};
