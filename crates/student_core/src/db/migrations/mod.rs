//! Versioned schema steps for the student database.
//!
//! # Responsibility
//! - List schema steps in strictly increasing version order.
//! - Run pending steps and the schema check as one transaction.
//!
//! # Invariants
//! - `PRAGMA user_version` equals the last applied step.
//! - A failed step or a failed schema check commits nothing, including the
//!   version bump.
//! - Running on an up-to-date database only re-checks the schema.

use crate::db::schema::verify_schema;
use crate::db::{DbError, DbResult};
use log::debug;
use rusqlite::{Connection, TransactionBehavior};

struct SchemaStep {
    version: u32,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[SchemaStep {
    version: 1,
    sql: include_str!("0001_students.sql"),
}];

/// Returns the newest schema version this binary can write.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Brings `conn` up to `latest_version()` and checks the resulting schema.
///
/// # Errors
/// - `UnsupportedSchemaVersion` when the file was written by a newer binary.
/// - `MissingRequiredTable` / `MissingRequiredColumn` when a pre-existing
///   table does not have the expected shape; the version stays untouched.
/// - `Sqlite` when a step fails.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = current_user_version(conn)?;
    let latest = latest_version();
    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
    let pending = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > from_version);
    for step in pending {
        debug!(
            "event=schema_step module=db status=start version={}",
            step.version
        );
        tx.execute_batch(step.sql)?;
        tx.pragma_update(None, "user_version", step.version)?;
    }

    // Dropping `tx` on error rolls the version bump back with the steps.
    verify_schema(&tx)?;
    tx.commit()?;
    Ok(())
}

pub(crate) fn current_user_version(conn: &Connection) -> DbResult<u32> {
    let version = conn.pragma_query_value(None, "user_version", |row| row.get::<_, u32>(0))?;
    Ok(version)
}
