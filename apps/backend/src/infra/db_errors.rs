//! SeaORM -> DomainError translation helpers.
//!
//! Adapters return raw `sea_orm::DbErr`; the repos layer converts it here
//! into `DomainError`, and higher layers map `DomainError` to `AppError`
//! via `From`. Constraint names must stay in sync with the migration.

use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

/// Extract table.column from SQLite "UNIQUE constraint failed: table.column"
/// error messages.
fn extract_sqlite_table_column(error_msg: &str) -> Option<&str> {
    if let Some(prefix) = error_msg.find("UNIQUE constraint failed: ") {
        let rest = &error_msg[prefix + "UNIQUE constraint failed: ".len()..];
        return rest.split_whitespace().next();
    }
    None
}

/// Map SQLite table.column format to domain-specific conflict errors.
fn map_sqlite_table_column_to_conflict(table_column: &str) -> Option<(ConflictKind, &'static str)> {
    match table_column {
        "users.username" => Some((ConflictKind::UniqueUsername, "username already registered")),
        "users.email" => Some((ConflictKind::UniqueEmail, "email already registered")),
        _ => None,
    }
}

/// Map PostgreSQL constraint names to domain-specific conflict errors.
fn map_postgres_constraint_to_conflict(error_msg: &str) -> Option<(ConflictKind, &'static str)> {
    if error_msg.contains("users_username_key") {
        return Some((ConflictKind::UniqueUsername, "username already registered"));
    }
    if error_msg.contains("users_email_key") {
        return Some((ConflictKind::UniqueEmail, "email already registered"));
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: sea_orm::DbErr) -> DomainError {
    let error_msg = e.to_string();

    match &e {
        sea_orm::DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "record not found");
        }
        sea_orm::DbErr::ConnectionAcquire(_) | sea_orm::DbErr::Conn(_) => {
            warn!(raw_error = %error_msg, "database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "database unavailable");
        }
        _ => {}
    }

    if mentions_sqlstate(&error_msg, "23505")
        || error_msg.contains("duplicate key value violates unique constraint")
        || error_msg.contains("UNIQUE constraint failed")
    {
        warn!(raw_error = %error_msg, "unique constraint violation");

        if let Some(table_column) = extract_sqlite_table_column(&error_msg) {
            if let Some((kind, detail)) = map_sqlite_table_column_to_conflict(table_column) {
                return DomainError::conflict(kind, detail);
            }
        }

        if let Some((kind, detail)) = map_postgres_constraint_to_conflict(&error_msg) {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") {
        warn!(raw_error = %error_msg, "foreign key constraint violation");
        return DomainError::validation("foreign key constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("pool") {
        warn!(raw_error = %error_msg, "database timeout or pool issue");
        return DomainError::infra(InfraErrorKind::Timeout, "database timeout");
    }

    error!(raw_error = %error_msg, "unhandled database error");
    DomainError::infra(
        InfraErrorKind::Other("DbErr".into()),
        "database operation failed",
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom(msg: &str) -> sea_orm::DbErr {
        sea_orm::DbErr::Custom(msg.to_string())
    }

    #[test]
    fn maps_postgres_duplicate_username() {
        let err = custom(
            r#"duplicate key value violates unique constraint "users_username_key""#,
        );
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::UniqueUsername, _) => {}
            other => panic!("expected username conflict, got {other:?}"),
        }
    }

    #[test]
    fn maps_postgres_duplicate_email() {
        let err = custom(r#"duplicate key value violates unique constraint "users_email_key""#);
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::UniqueEmail, _) => {}
            other => panic!("expected email conflict, got {other:?}"),
        }
    }

    #[test]
    fn maps_sqlite_duplicate_username() {
        let err = custom("error returned from database: UNIQUE constraint failed: users.username");
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::UniqueUsername, _) => {}
            other => panic!("expected username conflict, got {other:?}"),
        }
    }

    #[test]
    fn maps_sqlite_duplicate_email() {
        let err = custom("error returned from database: UNIQUE constraint failed: users.email");
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::UniqueEmail, _) => {}
            other => panic!("expected email conflict, got {other:?}"),
        }
    }

    #[test]
    fn unknown_unique_violation_falls_back_to_generic_conflict() {
        let err = custom("UNIQUE constraint failed: jobs.title");
        match map_db_err(err) {
            DomainError::Conflict(ConflictKind::Other(_), _) => {}
            other => panic!("expected generic conflict, got {other:?}"),
        }
    }

    #[test]
    fn record_not_found_maps_to_not_found() {
        let err = sea_orm::DbErr::RecordNotFound("users".into());
        match map_db_err(err) {
            DomainError::NotFound(_, _) => {}
            other => panic!("expected not-found, got {other:?}"),
        }
    }
}
