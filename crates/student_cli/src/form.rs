//! Text form for collecting one student record.
//!
//! # Responsibility
//! - Gather raw field text from flags or interactive prompts.
//! - Render a stored record back to the user.
//!
//! # Invariants
//! - The form never validates; `StudentInput::into_record` owns that rule.
//! - End of input counts as an empty answer.

use crate::args::AddArgs;
use std::io::{self, BufRead, Write};
use student_core::{StudentInput, StudentRecord};

const ID_LABEL: &str = "Student ID";
const NAME_LABEL: &str = "Name";
const ADDRESS_LABEL: &str = "Address";
const FACULTY_LABEL: &str = "Faculty";
const EMAIL_LABEL: &str = "Email";

/// Builds raw input from flags, prompting in form order for each field
/// that was not given on the command line.
pub fn collect_input(
    args: &AddArgs,
    reader: &mut impl BufRead,
    writer: &mut impl Write,
) -> io::Result<StudentInput> {
    let mut field = |given: &Option<String>, label: &str| match given {
        Some(value) => Ok(value.clone()),
        None => prompt(reader, writer, label),
    };

    Ok(StudentInput {
        id: field(&args.id, ID_LABEL)?,
        name: field(&args.name, NAME_LABEL)?,
        address: field(&args.address, ADDRESS_LABEL)?,
        faculty: field(&args.faculty, FACULTY_LABEL)?,
        email: field(&args.email, EMAIL_LABEL)?,
    })
}

fn prompt(reader: &mut impl BufRead, writer: &mut impl Write, label: &str) -> io::Result<String> {
    write!(writer, "{label}: ")?;
    writer.flush()?;

    let mut line = String::new();
    reader.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
}

/// Renders a stored record as labelled lines.
pub fn render_record(record: &StudentRecord) -> String {
    [
        (ID_LABEL, record.id.to_string()),
        (NAME_LABEL, record.name.clone()),
        (ADDRESS_LABEL, record.address.clone()),
        (FACULTY_LABEL, record.faculty.clone()),
        (EMAIL_LABEL, record.email.clone()),
    ]
    .iter()
    .map(|(label, value)| format!("  {label}: {value}\n"))
    .collect()
}
