//! Repository error type.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Errors surfaced by sessions and repository variants.
///
/// `InvalidModelName` is the only error the repository raises on its own
/// account. `Db` carries store failures unchanged.
#[derive(Debug)]
pub enum RepoError {
    InvalidModelName(String),
    NotFound { model: String, id: String },
    InvalidData(String),
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidModelName(name) => write!(f, "Invalid model name: {name}"),
            Self::NotFound { model, id } => write!(f, "{model} not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid record data: {message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidModelName(_) | Self::NotFound { .. } | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::InvalidData(value.to_string())
    }
}
