//! Command dispatch and composition root.
//!
//! # Responsibility
//! - Resolve configuration and start logging.
//! - Construct the one `RecordStore` for this process and hand it to the
//!   selected command. `add` opens it only after the form validates.
//! - Map core errors to user notices and exit codes.

use crate::args::{AddArgs, Cli, Command};
use crate::config::AppConfig;
use crate::form::{collect_input, render_record};
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};
use std::path::Path;
use student_core::db::DbError;
use student_core::{init_logging, RecordStore, StoreError, StudentRecord, StudentValidationError};

pub const EXIT_FAILURE: i32 = 1;
pub const EXIT_USER_ERROR: i32 = 2;

#[derive(Debug)]
pub enum CliError {
    Io(io::Error),
    Config(String),
    Logging(String),
    Validation(StudentValidationError),
    Store(StoreError),
}

impl CliError {
    /// `2` for caller-correctable input, `1` otherwise.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_)
            | Self::Validation(_)
            | Self::Store(StoreError::Validation(_))
            | Self::Store(StoreError::DuplicateKey(_)) => EXIT_USER_ERROR,
            Self::Io(_) | Self::Logging(_) | Self::Store(StoreError::StorageUnavailable(_)) => {
                EXIT_FAILURE
            }
        }
    }
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error: {err}"),
            Self::Config(message) => write!(f, "Invalid configuration: {message}"),
            Self::Logging(message) => write!(f, "Logging setup failed: {message}"),
            Self::Validation(err) | Self::Store(StoreError::Validation(err)) => {
                write_validation_notice(f, err)
            }
            Self::Store(StoreError::DuplicateKey(id)) => {
                write!(f, "Student ID {id} is already in use.")
            }
            Self::Store(StoreError::StorageUnavailable(err)) => {
                write!(f, "Storage unavailable: {err}")
            }
        }
    }
}

fn write_validation_notice(
    f: &mut Formatter<'_>,
    err: &StudentValidationError,
) -> std::fmt::Result {
    match err {
        StudentValidationError::MissingId | StudentValidationError::EmptyName => {
            write!(f, "Enter both a student ID and a name.")
        }
        StudentValidationError::InvalidId(value) => {
            write!(f, "Student ID must be a whole number, got `{value}`.")
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Config(_) | Self::Logging(_) => None,
            Self::Validation(err) => Some(err),
            Self::Store(err) => Some(err),
        }
    }
}

impl From<io::Error> for CliError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<StudentValidationError> for CliError {
    fn from(value: StudentValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<StoreError> for CliError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

/// Runs one CLI invocation against the process stdin/stdout.
pub fn run(cli: Cli) -> Result<(), CliError> {
    let current_dir = std::env::current_dir()?;
    let config = AppConfig::resolve(&cli, |key| std::env::var(key).ok(), &current_dir)
        .map_err(CliError::Config)?;

    if let Some(log_dir) = &config.log_dir {
        init_logging(config.log_level, &log_dir.to_string_lossy()).map_err(CliError::Logging)?;
    }

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    match cli.command {
        Command::Init => init_store(&config.db_path, &mut stdout),
        Command::Add(args) => add_student(&config.db_path, &args, &mut stdin.lock(), &mut stdout),
    }
}

fn init_store(db_path: &Path, writer: &mut impl Write) -> Result<(), CliError> {
    info!("event=cli_command module=cli status=start command=init");
    let mut store = RecordStore::open(db_path)?;
    store.initialize()?;
    writeln!(writer, "Database ready: {}", db_path.display())?;
    Ok(())
}

/// Collects one record and stores it in the database at `db_path`.
///
/// The database file is not opened until the form has validated.
pub fn add_student(
    db_path: &Path,
    args: &AddArgs,
    reader: &mut impl BufRead,
    writer: &mut impl Write,
) -> Result<(), CliError> {
    info!("event=cli_command module=cli status=start command=add");
    let record = collect_record(args, reader, writer)?;
    let mut store = RecordStore::open(db_path)?;
    store_student(&mut store, &record, writer)
}

/// Fills the form from flags and prompts, then validates it.
pub fn collect_record(
    args: &AddArgs,
    reader: &mut impl BufRead,
    writer: &mut impl Write,
) -> Result<StudentRecord, CliError> {
    Ok(collect_input(args, reader, writer)?.into_record()?)
}

/// Inserts a validated record and echoes the row read back from storage.
pub fn store_student(
    store: &mut RecordStore,
    record: &StudentRecord,
    writer: &mut impl Write,
) -> Result<(), CliError> {
    store.initialize()?;
    store.insert(record)?;
    let stored = store.get(record.id)?.ok_or_else(|| {
        StoreError::StorageUnavailable(DbError::InvalidData(format!(
            "student {} missing after insert",
            record.id
        )))
    })?;

    writeln!(writer, "Student added.")?;
    write!(writer, "{}", render_record(&stored))?;
    Ok(())
}
