//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the data access contract for student rows.
//! - Isolate SQLite query details from the store.
//!
//! # Invariants
//! - Repository writes must enforce `StudentRecord::validate()` before SQL.
//! - Constraint violations surface as semantic errors (`DuplicateKey`),
//!   not raw SQLite errors.

pub mod student_repo;
