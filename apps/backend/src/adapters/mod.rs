//! SeaORM adapters. Everything here returns `DbErr`; the repos layer
//! translates into `DomainError` via `map_db_err`.

pub mod jobs_sea;
pub mod users_sea;
