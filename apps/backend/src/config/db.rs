use std::env;

use crate::error::AppError;

/// Connection string used for the in-memory test database.
pub const SQLITE_MEMORY_URL: &str = "sqlite::memory:";

/// Database profile enum for different environments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProfile {
    /// Production database (Postgres, `DATABASE_URL`)
    Prod,
    /// Test database (in-memory SQLite, migrated on connect)
    Test,
}

/// Resolve the connection URL for a profile.
///
/// Prod requires `DATABASE_URL`; Test always uses in-memory SQLite so a run
/// can never touch a real database by accident.
pub fn db_url(profile: DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => env::var("DATABASE_URL").map_err(|_| {
            AppError::config("Required environment variable 'DATABASE_URL' is not set")
        }),
        DbProfile::Test => Ok(SQLITE_MEMORY_URL.to_string()),
    }
}
