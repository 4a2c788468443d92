//! Core use-case services.
//!
//! # Responsibility
//! - Own the storage connection on behalf of callers.
//! - Keep UI/CLI layers decoupled from SQL and schema details.

pub mod record_store;
