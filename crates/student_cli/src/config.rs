//! Runtime configuration resolved from flags and environment.
//!
//! # Invariants
//! - Flags win over environment, environment wins over defaults.
//! - `log_dir` is always absolute once resolved.
//! - `log_level` is validated even when logging stays off.

use crate::args::Cli;
use std::path::{Path, PathBuf};
use student_core::{default_log_level, normalize_level};

pub const DB_PATH_ENV: &str = "STUDENT_REGISTRY_DB";
pub const DEFAULT_DB_FILE: &str = "students.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: &'static str,
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Resolves configuration from parsed args.
    ///
    /// `env` looks up environment variables and `current_dir` anchors a
    /// relative `--log-dir`.
    ///
    /// # Errors
    /// - `--log-level` is not a supported level name.
    pub fn resolve(
        cli: &Cli,
        env: impl Fn(&str) -> Option<String>,
        current_dir: &Path,
    ) -> Result<Self, String> {
        let db_path = cli
            .db
            .clone()
            .or_else(|| {
                env(DB_PATH_ENV)
                    .map(|raw| raw.trim().to_string())
                    .filter(|raw| !raw.is_empty())
                    .map(PathBuf::from)
            })
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE));

        let log_level = match cli.log_level.as_deref() {
            Some(raw) => normalize_level(raw)?,
            None => default_log_level(),
        };

        let log_dir = cli.log_dir.as_ref().map(|dir| {
            if dir.is_absolute() {
                dir.clone()
            } else {
                current_dir.join(dir)
            }
        });

        Ok(Self {
            db_path,
            log_level,
            log_dir,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, DB_PATH_ENV, DEFAULT_DB_FILE};
    use crate::args::Cli;
    use clap::Parser;
    use std::path::{Path, PathBuf};

    fn parse(args: &[&str]) -> Cli {
        let mut full = vec!["student-registry"];
        full.extend_from_slice(args);
        full.push("init");
        Cli::try_parse_from(full).unwrap()
    }

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_apply_without_flags_or_env() {
        let config = AppConfig::resolve(&parse(&[]), no_env, Path::new("/work")).unwrap();

        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE));
        assert_eq!(config.log_level, student_core::default_log_level());
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn env_is_used_when_flag_missing() {
        let env = |key: &str| (key == DB_PATH_ENV).then(|| " /data/reg.db ".to_string());
        let config = AppConfig::resolve(&parse(&[]), env, Path::new("/work")).unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/reg.db"));
    }

    #[test]
    fn blank_env_falls_back_to_default() {
        let env = |_: &str| Some("   ".to_string());
        let config = AppConfig::resolve(&parse(&[]), env, Path::new("/work")).unwrap();
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE));
    }

    #[test]
    fn flag_overrides_env() {
        let env = |_: &str| Some("/data/env.db".to_string());
        let config = AppConfig::resolve(&parse(&["--db", "/data/flag.db"]), env, Path::new("/"))
            .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/data/flag.db"));
    }

    #[test]
    fn relative_log_dir_is_anchored_to_current_dir() {
        let config = AppConfig::resolve(
            &parse(&["--log-dir", "logs", "--log-level", "warn"]),
            no_env,
            Path::new("/work"),
        )
        .unwrap();
        assert_eq!(config.log_dir, Some(PathBuf::from("/work/logs")));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn log_level_is_normalized_without_log_dir() {
        let config =
            AppConfig::resolve(&parse(&["--log-level", "WARNING"]), no_env, Path::new("/")).unwrap();
        assert_eq!(config.log_level, "warn");
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn unknown_log_level_is_rejected_without_log_dir() {
        let err = AppConfig::resolve(&parse(&["--log-level", "loud"]), no_env, Path::new("/"))
            .unwrap_err();
        assert!(err.contains("unsupported log level `loud`"));
    }
}
