//! Schema readiness checks.
//!
//! # Invariants
//! - A ready connection is at the latest `user_version`.
//! - The `students` table exists with every column the repository touches.

use super::migrations::{current_user_version, latest_version};
use super::{DbError, DbResult};
use rusqlite::Connection;

pub(crate) const STUDENTS_TABLE: &str = "students";
const STUDENTS_COLUMNS: &[&str] = &["id", "name", "address", "faculty", "email"];

/// Verifies that `conn` has been migrated and carries the `students` schema.
///
/// # Errors
/// - `UninitializedSchema` when `user_version` lags behind this binary.
/// - `MissingRequiredTable` / `MissingRequiredColumn` when the table shape
///   does not match.
pub fn verify_schema(conn: &Connection) -> DbResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version < expected_version {
        return Err(DbError::UninitializedSchema {
            expected_version,
            actual_version,
        });
    }

    let table_exists: bool = conn.query_row(
        "SELECT EXISTS(
            SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
        );",
        [STUDENTS_TABLE],
        |row| row.get(0),
    )?;
    if !table_exists {
        return Err(DbError::MissingRequiredTable(STUDENTS_TABLE));
    }

    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let present = stmt
        .query_map([STUDENTS_TABLE], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    for &column in STUDENTS_COLUMNS {
        if !present.iter().any(|name| name.as_str() == column) {
            return Err(DbError::MissingRequiredColumn {
                table: STUDENTS_TABLE,
                column,
            });
        }
    }

    Ok(())
}
