//! Error handling for the job-board backend.

pub mod domain;

pub use domain::DomainError;
