//! SQLite bootstrap for the database-backed repository variant.
//!
//! # Responsibility
//! - Open file or in-memory connections with the pragmas sessions rely on.
//! - Bring the `records` schema up to date before any session uses it.
//!
//! # Invariants
//! - Schema version lives in `PRAGMA user_version`.
//! - A connection handed out by this module is fully migrated.

pub mod migrations;
mod open;

pub use open::{open_db, open_db_in_memory};

use std::fmt;

pub type DbResult<T> = Result<T, DbError>;

/// Why a records database could not be opened or queried.
///
/// Repository callers receive this unchanged inside `RepoError::Db`.
#[derive(Debug)]
pub enum DbError {
    /// Any failure reported by SQLite itself.
    Sqlite(rusqlite::Error),
    /// The file carries a `user_version` this build has no migrations for.
    SchemaTooNew { found: u32, supported: u32 },
}

impl DbError {
    /// Stable short code for `error_code=` log fields.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Sqlite(_) => "sqlite",
            Self::SchemaTooNew { .. } => "schema_too_new",
        }
    }
}

impl fmt::Display for DbError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "sqlite error: {err}"),
            Self::SchemaTooNew { found, supported } => write!(
                f,
                "records database is at schema v{found}, this build reads up to v{supported}"
            ),
        }
    }
}

impl std::error::Error for DbError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        if let Self::Sqlite(err) = self {
            Some(err)
        } else {
            None
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}
