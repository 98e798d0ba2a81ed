use std::time::Duration;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::config::uploads::UploadConfig;

/// Per-operation store budget; a service call that exceeds it fails with a
/// timeout rather than holding the connection.
pub const DEFAULT_OP_DEADLINE: Duration = Duration::from_secs(5);

/// Application state containing shared resources.
///
/// Constructed once at startup and injected into handlers via `web::Data`;
/// there is no global configuration singleton.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (optional for handler tests that never touch it)
    pub db: Option<DatabaseConnection>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    /// Profile-picture upload settings
    pub uploads: UploadConfig,
    /// Deadline applied to each transactional unit of work
    pub op_deadline: Duration,
}

impl AppState {
    pub fn new(db: DatabaseConnection, security: SecurityConfig, uploads: UploadConfig) -> Self {
        Self {
            db: Some(db),
            security,
            uploads,
            op_deadline: DEFAULT_OP_DEADLINE,
        }
    }

    /// Create an AppState without a database connection (for testing)
    pub fn without_db(security: SecurityConfig, uploads: UploadConfig) -> Self {
        Self {
            db: None,
            security,
            uploads,
            op_deadline: DEFAULT_OP_DEADLINE,
        }
    }

    pub fn with_op_deadline(mut self, deadline: Duration) -> Self {
        self.op_deadline = deadline;
        self
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
