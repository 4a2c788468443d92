//! Student record domain model.
//!
//! # Responsibility
//! - Define the one record shape stored in the `students` table.
//! - Normalize raw form text into a validated record.
//!
//! # Invariants
//! - `name` is non-empty after trimming.
//! - Optional fields are plain strings; empty means "not provided".
//! - The record itself never rewrites field text. Trimming happens only in
//!   `StudentInput::into_record`.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Caller-supplied primary key of a student row.
pub type StudentId = i64;

/// Validation failures detected before any storage access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudentValidationError {
    /// Name is empty or whitespace-only.
    EmptyName,
    /// Student ID field was left empty.
    MissingId,
    /// Student ID text is not a base-10 integer.
    InvalidId(String),
}

impl Display for StudentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyName => write!(f, "student name must not be empty"),
            Self::MissingId => write!(f, "student id must not be empty"),
            Self::InvalidId(value) => write!(f, "student id `{value}` is not an integer"),
        }
    }
}

impl Error for StudentValidationError {}

/// One student's stored information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StudentRecordWire")]
pub struct StudentRecord {
    /// Primary key. Unique across the table.
    pub id: StudentId,
    /// Required display name.
    pub name: String,
    /// Place of residence.
    pub address: String,
    pub faculty: String,
    pub email: String,
}

#[derive(Deserialize)]
struct StudentRecordWire {
    id: StudentId,
    #[serde(default)]
    name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    faculty: String,
    #[serde(default)]
    email: String,
}

impl TryFrom<StudentRecordWire> for StudentRecord {
    type Error = StudentValidationError;

    fn try_from(value: StudentRecordWire) -> Result<Self, Self::Error> {
        let record = Self {
            id: value.id,
            name: value.name,
            address: value.address,
            faculty: value.faculty,
            email: value.email,
        };
        record.validate()?;
        Ok(record)
    }
}

impl StudentRecord {
    /// Creates a record with only the required fields set.
    ///
    /// Optional fields start empty. This constructor does not validate;
    /// callers go through `validate()` or the store before persistence.
    pub fn new(id: StudentId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            address: String::new(),
            faculty: String::new(),
            email: String::new(),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_faculty(mut self, faculty: impl Into<String>) -> Self {
        self.faculty = faculty.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    /// Checks the required-field rule.
    ///
    /// # Errors
    /// - `EmptyName` when `name` is empty after trimming.
    pub fn validate(&self) -> Result<(), StudentValidationError> {
        if self.name.trim().is_empty() {
            return Err(StudentValidationError::EmptyName);
        }
        Ok(())
    }
}

/// Raw, untyped text collected by an input form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentInput {
    pub id: String,
    pub name: String,
    pub address: String,
    pub faculty: String,
    pub email: String,
}

impl StudentInput {
    /// Trims every field and converts the input into a validated record.
    ///
    /// # Errors
    /// - `MissingId` when the id field is blank.
    /// - `InvalidId` when the id is not an `i64`.
    /// - `EmptyName` when the name field is blank.
    pub fn into_record(self) -> Result<StudentRecord, StudentValidationError> {
        let id_text = self.id.trim();
        if id_text.is_empty() {
            return Err(StudentValidationError::MissingId);
        }
        let id = id_text
            .parse::<StudentId>()
            .map_err(|_| StudentValidationError::InvalidId(id_text.to_string()))?;

        let record = StudentRecord {
            id,
            name: self.name.trim().to_string(),
            address: self.address.trim().to_string(),
            faculty: self.faculty.trim().to_string(),
            email: self.email.trim().to_string(),
        };
        record.validate()?;
        Ok(record)
    }
}
