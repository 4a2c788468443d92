//! Core domain logic for the student registry.
//! This crate is the single source of truth for record validation and
//! persistence rules.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status, normalize_level};
pub use model::student::{StudentId, StudentInput, StudentRecord, StudentValidationError};
pub use repo::student_repo::{
    SqliteStudentRepository, StoreError, StoreResult, StudentRepository,
};
pub use service::record_store::{RecordStore, StoreState};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
