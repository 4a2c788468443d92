//! CLI argument definitions using clap.
//!
//! Commands:
//! - student-registry init
//! - student-registry add [--id ID] [--name NAME] [--address A] [--faculty F] [--email E]

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Student registry: collect student details and store them locally.
#[derive(Parser, Debug)]
#[command(name = "student-registry")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the SQLite database file
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Log level (trace|debug|info|warn|error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Directory for rolling log files; logging is off when omitted
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create the students table if it does not exist yet
    Init,

    /// Add a new student; prompts for each field not given as a flag
    Add(AddArgs),
}

/// Raw form fields. Kept as text so the form applies one validation path.
#[derive(Args, Debug, Default, Clone, PartialEq, Eq)]
pub struct AddArgs {
    /// Student ID (integer, must be unique)
    #[arg(long)]
    pub id: Option<String>,

    /// Full name (required)
    #[arg(long)]
    pub name: Option<String>,

    /// Place of residence
    #[arg(long)]
    pub address: Option<String>,

    #[arg(long)]
    pub faculty: Option<String>,

    #[arg(long)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::{AddArgs, Cli, Command};
    use clap::Parser;
    use std::path::PathBuf;

    #[test]
    fn parses_add_with_global_options_after_subcommand() {
        let cli = Cli::try_parse_from([
            "student-registry",
            "add",
            "--id",
            "1",
            "--name",
            "Ivan Petrenko",
            "--db",
            "/tmp/students.db",
        ])
        .unwrap();

        assert_eq!(cli.db, Some(PathBuf::from("/tmp/students.db")));
        match cli.command {
            Command::Add(args) => {
                assert_eq!(args.id.as_deref(), Some("1"));
                assert_eq!(args.name.as_deref(), Some("Ivan Petrenko"));
                assert_eq!(args.email, None);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn add_without_flags_leaves_every_field_unset() {
        let cli = Cli::try_parse_from(["student-registry", "add"]).unwrap();
        match cli.command {
            Command::Add(args) => assert_eq!(args, AddArgs::default()),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn subcommand_is_required() {
        assert!(Cli::try_parse_from(["student-registry"]).is_err());
    }
}
