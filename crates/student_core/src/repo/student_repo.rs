//! Student repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide insert and primary-key read APIs over the `students` table.
//! - Translate SQLite constraint failures into `StoreError` variants.
//!
//! # Invariants
//! - Write paths call `StudentRecord::validate()` before SQL mutations.
//! - Inserts never overwrite: a taken id is `DuplicateKey`.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::{verify_schema, DbError};
use crate::model::student::{StudentId, StudentRecord, StudentValidationError};
use rusqlite::{ffi, params, Connection, ErrorCode, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const STUDENT_SELECT_SQL: &str = "SELECT
    id,
    name,
    address,
    faculty,
    email
FROM students";

pub type StoreResult<T> = Result<T, StoreError>;

/// Failure taxonomy for student persistence.
#[derive(Debug)]
pub enum StoreError {
    /// Caller-correctable; raised before storage is touched.
    Validation(StudentValidationError),
    /// Primary key already taken. Caller must choose another id.
    DuplicateKey(StudentId),
    /// Backing file cannot be opened, read, or written.
    StorageUnavailable(DbError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateKey(id) => write!(f, "student id {id} is already in use"),
            Self::StorageUnavailable(err) => write!(f, "storage unavailable: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateKey(_) => None,
            Self::StorageUnavailable(err) => Some(err),
        }
    }
}

impl StoreError {
    /// Stable metadata-only code used in log events.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::DuplicateKey(_) => "duplicate_key",
            Self::StorageUnavailable(_) => "storage_unavailable",
        }
    }
}

impl From<StudentValidationError> for StoreError {
    fn from(value: StudentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::StorageUnavailable(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::StorageUnavailable(DbError::Sqlite(value))
    }
}

/// Repository interface for student rows.
pub trait StudentRepository {
    /// Inserts one row and returns the number of rows written.
    fn insert_student(&self, record: &StudentRecord) -> StoreResult<usize>;
    /// Reads one row by primary key.
    fn get_student(&self, id: StudentId) -> StoreResult<Option<StudentRecord>>;
    fn count_students(&self) -> StoreResult<u64>;
}

/// SQLite-backed student repository.
pub struct SqliteStudentRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStudentRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `StorageUnavailable` when the connection schema is missing or stale.
    pub fn try_new(conn: &'conn Connection) -> StoreResult<Self> {
        verify_schema(conn)?;
        Ok(Self { conn })
    }
}

impl StudentRepository for SqliteStudentRepository<'_> {
    fn insert_student(&self, record: &StudentRecord) -> StoreResult<usize> {
        record.validate()?;

        let inserted = self
            .conn
            .execute(
                "INSERT INTO students (id, name, address, faculty, email)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    record.id,
                    record.name.as_str(),
                    empty_to_null(&record.address),
                    empty_to_null(&record.faculty),
                    empty_to_null(&record.email),
                ],
            )
            .map_err(|err| {
                if is_key_violation(&err) {
                    StoreError::DuplicateKey(record.id)
                } else {
                    StoreError::from(err)
                }
            })?;

        Ok(inserted)
    }

    fn get_student(&self, id: StudentId) -> StoreResult<Option<StudentRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{STUDENT_SELECT_SQL} WHERE id = ?1;"))?;
        let raw = stmt.query_row([id], read_raw_row).optional()?;

        match raw {
            Some(raw) => Ok(Some(parse_student_row(raw)?)),
            None => Ok(None),
        }
    }

    fn count_students(&self) -> StoreResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM students;", [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| DbError::InvalidData(format!("negative row count {count}")).into())
    }
}

struct RawStudentRow {
    id: StudentId,
    name: String,
    address: Option<String>,
    faculty: Option<String>,
    email: Option<String>,
}

fn read_raw_row(row: &Row<'_>) -> rusqlite::Result<RawStudentRow> {
    Ok(RawStudentRow {
        id: row.get("id")?,
        name: row.get("name")?,
        address: row.get("address")?,
        faculty: row.get("faculty")?,
        email: row.get("email")?,
    })
}

fn parse_student_row(raw: RawStudentRow) -> StoreResult<StudentRecord> {
    let record = StudentRecord {
        id: raw.id,
        name: raw.name,
        address: raw.address.unwrap_or_default(),
        faculty: raw.faculty.unwrap_or_default(),
        email: raw.email.unwrap_or_default(),
    };
    if record.validate().is_err() {
        return Err(DbError::InvalidData(format!(
            "blank name for id {} in students.name",
            record.id
        ))
        .into());
    }
    Ok(record)
}

fn empty_to_null(value: &str) -> Option<&str> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

fn is_key_violation(err: &rusqlite::Error) -> bool {
    match err {
        rusqlite::Error::SqliteFailure(inner, _) => {
            inner.code == ErrorCode::ConstraintViolation
                && (inner.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY
                    || inner.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE)
        }
        _ => false,
    }
}
