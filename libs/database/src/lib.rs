//! PostgreSQL plumbing for the user directory
//!
//! Pool configuration from the environment, connection with backoff, schema
//! migration and health checks. The tables themselves live in the `migration`
//! crate and the queries in the domain crates.
//!
//! ```ignore
//! use core_config::FromEnv;
//! use database::postgres::{self, PostgresConfig};
//! use migration::Migrator;
//!
//! let db = postgres::connect_from_config_with_retry(PostgresConfig::from_env()?, None).await?;
//! postgres::run_migrations::<Migrator>(&db, "user_directory").await?;
//! postgres::check_health(&db).await?;
//! ```

pub mod error;
pub mod postgres;
pub mod retry;

pub use error::{DatabaseError, DatabaseResult};
pub use retry::{RetryConfig, retry_with_backoff};
