use std::time::Duration;

use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, DbProfile};
use crate::error::AppError;

/// Connect to the database for the given profile.
/// This function does NOT run any migrations.
pub async fn connect_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let database_url = db_url(profile)?;

    let mut opts = ConnectOptions::new(database_url);
    opts.sqlx_logging(false)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5));

    match profile {
        DbProfile::Prod => {
            opts.max_connections(10).min_connections(1);
        }
        DbProfile::Test => {
            // In-memory SQLite exists per connection; a single pooled
            // connection keeps every handle on the same database.
            opts.max_connections(1).min_connections(1);
        }
    }

    let conn = Database::connect(opts).await?;
    Ok(conn)
}

/// Single entrypoint for startup and tests: connect, then bring the schema
/// up to date.
pub async fn bootstrap_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile).await?;

    Migrator::up(&conn, None)
        .await
        .map_err(|e| AppError::db(format!("migration failed: {e}")))?;
    info!(profile = ?profile, "database ready");

    Ok(conn)
}
