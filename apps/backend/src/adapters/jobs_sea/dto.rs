//! DTOs for the jobs_sea adapter.

/// DTO for inserting a job row. The owner always comes from the
/// authenticated actor, never from client input.
#[derive(Debug, Clone)]
pub struct JobCreate {
    pub title: String,
    pub description: String,
    pub location: String,
    pub company: String,
    pub salary: String,
    pub user_id: i64,
}

/// DTO for the full-field overwrite applied by job updates.
/// The owner column is deliberately absent.
#[derive(Debug, Clone)]
pub struct JobUpdate {
    pub title: String,
    pub description: String,
    pub location: String,
    pub company: String,
    pub salary: String,
}
