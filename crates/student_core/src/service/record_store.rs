//! Student record store.
//!
//! # Responsibility
//! - Own the single `students` table connection for one process.
//! - Expose `initialize()` and `insert()` as the persistence use-cases.
//!
//! # Invariants
//! - Validation runs before any storage access.
//! - `initialize()` is idempotent and the only `Uninitialized -> Ready`
//!   transition.
//! - Every failure path leaves the table exactly as it was.

use crate::db::migrations::{apply_migrations, latest_version};
use crate::db::{connect_db, connect_db_in_memory};
use crate::model::student::{StudentId, StudentRecord};
use crate::repo::student_repo::{
    SqliteStudentRepository, StoreError, StoreResult, StudentRepository,
};
use log::{error, info, warn};
use rusqlite::Connection;
use std::path::Path;

/// Externally visible lifecycle of a `RecordStore`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreState {
    Uninitialized,
    Ready,
}

/// Explicitly constructed owner of the student table.
///
/// Built once by the application's composition root and handed by
/// reference to whatever collects input.
pub struct RecordStore {
    conn: Connection,
    state: StoreState,
}

impl RecordStore {
    /// Opens (creating if absent) the database file at `path`.
    ///
    /// The returned store is `Uninitialized`; no table is created yet.
    ///
    /// # Errors
    /// - `StorageUnavailable` when the file cannot be opened.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = connect_db(path)?;
        Ok(Self::from_connection(conn))
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = connect_db_in_memory()?;
        Ok(Self::from_connection(conn))
    }

    fn from_connection(conn: Connection) -> Self {
        Self {
            conn,
            state: StoreState::Uninitialized,
        }
    }

    pub fn state(&self) -> StoreState {
        self.state
    }

    /// Ensures the `students` table exists.
    ///
    /// Safe to call on every startup; existing rows are never touched.
    ///
    /// # Errors
    /// - `StorageUnavailable` when migrations fail, the file is corrupt, or
    ///   the schema was written by a newer binary.
    pub fn initialize(&mut self) -> StoreResult<()> {
        match apply_migrations(&mut self.conn) {
            Ok(()) => {
                self.state = StoreState::Ready;
                info!(
                    "event=store_initialize module=store status=ok schema_version={}",
                    latest_version()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_initialize module=store status=error error_code=storage_unavailable error={}",
                    err
                );
                Err(StoreError::StorageUnavailable(err))
            }
        }
    }

    /// Validates and persists one record.
    ///
    /// Initializes the store first when it is still `Uninitialized`.
    /// Returns the number of rows written (always 1 on success).
    ///
    /// # Errors
    /// - `Validation` when the name is blank; storage is not touched.
    /// - `DuplicateKey` when `record.id` is already stored.
    /// - `StorageUnavailable` on any storage failure.
    pub fn insert(&mut self, record: &StudentRecord) -> StoreResult<usize> {
        let result = self.insert_inner(record);
        match &result {
            Ok(_) => info!(
                "event=student_insert module=store status=ok id={}",
                record.id
            ),
            Err(err @ StoreError::StorageUnavailable(_)) => error!(
                "event=student_insert module=store status=error id={} error_code={} error={}",
                record.id,
                err.code(),
                err
            ),
            Err(err) => warn!(
                "event=student_insert module=store status=rejected id={} error_code={}",
                record.id,
                err.code()
            ),
        }
        result
    }

    fn insert_inner(&mut self, record: &StudentRecord) -> StoreResult<usize> {
        record.validate()?;
        self.ensure_ready()?;
        self.repo()?.insert_student(record)
    }

    /// Reads one stored record by id.
    pub fn get(&self, id: StudentId) -> StoreResult<Option<StudentRecord>> {
        self.repo()?.get_student(id)
    }

    /// Returns the number of stored records.
    pub fn count(&self) -> StoreResult<u64> {
        self.repo()?.count_students()
    }

    fn ensure_ready(&mut self) -> StoreResult<()> {
        if self.state == StoreState::Uninitialized {
            self.initialize()?;
        }
        Ok(())
    }

    fn repo(&self) -> StoreResult<SqliteStudentRepository<'_>> {
        SqliteStudentRepository::try_new(&self.conn)
    }
}
