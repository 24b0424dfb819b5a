//! Shared test utilities for the directory crates
//!
//! - `TestDatabase`: migrated PostgreSQL container, removed on drop
//! - `TestDataBuilder`: deterministic user names and emails per test
//! - `assertions`: assertion helpers
//!
//! ```rust,no_run
//! use test_utils::{TestDatabase, TestDataBuilder};
//!
//! # async fn example() {
//! let db = TestDatabase::new().await;
//! let builder = TestDataBuilder::from_test_name("test_save_user");
//!
//! let name = builder.user_name("main");
//! let email = builder.email("main");
//! # let _ = (db.connection(), name, email);
//! # }
//! ```

mod postgres;

pub use postgres::TestDatabase;

/// Longest user name the directory accepts
const MAX_USER_NAME_LEN: usize = 25;

/// Builder for test data with deterministic randomization
///
/// Names from different seeds differ, so tests sharing a database do not
/// trip over each other's unique names.
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from a hash of the test name
    pub fn from_test_name(name: &str) -> Self {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Self::new(hasher.finish())
    }

    /// User name unique to this seed and `suffix`, cut to the directory's limit
    ///
    /// ```
    /// use test_utils::TestDataBuilder;
    ///
    /// let name = TestDataBuilder::new(0xabcdef).user_name("main");
    /// assert_eq!(name, "t00abcdef-main");
    /// ```
    pub fn user_name(&self, suffix: &str) -> String {
        let mut name = format!("t{:08x}-{}", self.seed as u32, suffix);
        name.truncate(MAX_USER_NAME_LEN);
        name
    }

    pub fn email(&self, suffix: &str) -> String {
        format!("{}@test.example.com", self.user_name(suffix))
    }
}

/// Test assertion helpers
pub mod assertions {
    /// Unwrap `value`, panicking with `context` when it is `None`
    pub fn assert_some<T>(value: Option<T>, context: &str) -> T {
        value.unwrap_or_else(|| panic!("{}: expected Some, got None", context))
    }
}
