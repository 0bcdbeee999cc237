//! Process configuration for repository variant selection.
//!
//! # Responsibility
//! - Read the `USE_DATABASE` toggle once, at construction time.
//! - Resolve the database path and log directory used by host binaries.
//!
//! # Invariants
//! - Only `true`, `1` and `t` (any case) enable the database variant.
//! - A missing or unreadable variable means "file-backed".

use std::path::PathBuf;

/// Environment variable selecting the database-backed repository.
pub const USE_DATABASE_ENV_VAR: &str = "USE_DATABASE";
/// Environment variable overriding the records database location.
pub const DB_PATH_ENV_VAR: &str = "DUALSTORE_DB_PATH";
/// Environment variable overriding where host binaries write log files.
pub const LOG_DIR_ENV_VAR: &str = "DUALSTORE_LOG_DIR";

const DEFAULT_DB_FILE_NAME: &str = "dualstore.db";
const DEFAULT_LOG_DIR_NAME: &str = "dualstore-logs";

/// Snapshot of the configuration a repository is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RepoConfig {
    /// `true` routes every call to the session, `false` to the file variant.
    pub use_database: bool,
    /// Explicit database file, when configured.
    pub db_path: Option<PathBuf>,
    /// Explicit log directory, when configured.
    pub log_dir: Option<PathBuf>,
}

impl RepoConfig {
    /// Reads configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads configuration through an arbitrary key lookup.
    ///
    /// Lets tests supply values without mutating the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let use_database = lookup(USE_DATABASE_ENV_VAR)
            .map(|raw| parse_flag(&raw))
            .unwrap_or(false);
        let db_path = lookup(DB_PATH_ENV_VAR).and_then(|raw| non_blank_path(&raw));
        let log_dir = lookup(LOG_DIR_ENV_VAR).and_then(|raw| non_blank_path(&raw));

        Self {
            use_database,
            db_path,
            log_dir,
        }
    }

    /// Returns the configured database path or a file in the temp directory.
    pub fn resolved_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
    }

    /// Returns the configured log directory or one in the temp directory.
    pub fn resolved_log_dir(&self) -> PathBuf {
        self.log_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_LOG_DIR_NAME))
    }

    /// Short label used in log lines.
    pub fn mode_label(&self) -> &'static str {
        if self.use_database {
            "database"
        } else {
            "file"
        }
    }
}

fn non_blank_path(raw: &str) -> Option<PathBuf> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| PathBuf::from(trimmed))
}

/// Parses a boolean toggle value.
pub fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "t"
    )
}

#[cfg(test)]
mod tests {
    use super::{parse_flag, RepoConfig, DB_PATH_ENV_VAR, LOG_DIR_ENV_VAR, USE_DATABASE_ENV_VAR};
    use std::collections::HashMap;
    use std::path::PathBuf;

    fn config_from(pairs: &[(&str, &str)]) -> RepoConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        RepoConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn parse_flag_accepts_truthy_values_in_any_case() {
        for value in ["true", "TRUE", "True", "1", "t", "T", " true "] {
            assert!(parse_flag(value), "`{value}` should be truthy");
        }
    }

    #[test]
    fn parse_flag_rejects_everything_else() {
        for value in ["false", "0", "f", "yes", "on", "", "tru", "11"] {
            assert!(!parse_flag(value), "`{value}` should be falsy");
        }
    }

    #[test]
    fn missing_variable_defaults_to_file_mode() {
        let config = config_from(&[]);
        assert!(!config.use_database);
        assert_eq!(config.mode_label(), "file");
        assert!(config.db_path.is_none());
        assert!(config.log_dir.is_none());
    }

    #[test]
    fn lookup_reads_flag_and_path() {
        let config = config_from(&[
            (USE_DATABASE_ENV_VAR, "t"),
            (DB_PATH_ENV_VAR, " /var/lib/dualstore/records.db "),
        ]);
        assert!(config.use_database);
        assert_eq!(config.mode_label(), "database");
        assert_eq!(
            config.resolved_db_path(),
            PathBuf::from("/var/lib/dualstore/records.db")
        );
    }

    #[test]
    fn blank_path_falls_back_to_temp_dir() {
        let config = config_from(&[(DB_PATH_ENV_VAR, "   ")]);
        assert!(config.db_path.is_none());
        assert!(config
            .resolved_db_path()
            .starts_with(std::env::temp_dir()));
    }

    #[test]
    fn log_dir_is_read_and_falls_back_to_temp_dir() {
        let config = config_from(&[(LOG_DIR_ENV_VAR, "/var/log/dualstore")]);
        assert_eq!(
            config.resolved_log_dir(),
            PathBuf::from("/var/log/dualstore")
        );

        let fallback = config_from(&[(LOG_DIR_ENV_VAR, "")]);
        assert!(fallback.log_dir.is_none());
        let dir = fallback.resolved_log_dir();
        assert!(dir.starts_with(std::env::temp_dir()));
        assert!(dir.is_absolute());
    }
}
