//! Domain model for student registry records.
//!
//! # Responsibility
//! - Define the canonical record persisted by the store.
//! - Define the raw form input shape and its conversion into a record.
//!
//! # Invariants
//! - Every stored record is identified by a caller-supplied `StudentId`.
//! - A record never carries a blank name.

pub mod student;
