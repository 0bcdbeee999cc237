//! Repository contract and its storage variants.
//!
//! # Responsibility
//! - Define the uniform CRUD contract (`Repository`).
//! - Provide the session-backed and file-backed variants, plus the
//!   configuration-driven dispatcher that picks exactly one of them.
//!
//! # Invariants
//! - Model names are validated, then resolved, before any storage access.
//! - Store failures propagate unchanged inside `RepoError::Db`.

pub mod configured;
pub mod db_repo;
pub mod error;
pub mod file_repo;
pub mod session;

use crate::model::record::{Model, Record};
use crate::model::registry::{ModelDescriptor, ModelRegistry};
use error::{RepoError, RepoResult};

/// Uniform CRUD contract shared by every repository variant.
pub trait Repository {
    /// Returns every stored record of `model_name`, in insertion order.
    fn get_all(&self, model_name: &str) -> RepoResult<Vec<Record>>;
    /// Returns one record, or `None` when no record has `obj_id`.
    fn get(&self, model_name: &str, obj_id: &str) -> RepoResult<Option<Record>>;
    /// Discards uncommitted changes.
    fn reload(&mut self) -> RepoResult<()>;
    /// Inserts or replaces `record` and commits.
    fn save(&mut self, record: &Record) -> RepoResult<()>;
    /// Writes changes to an existing record, commits and hands it back.
    fn update(&mut self, record: Record) -> RepoResult<Record>;
    /// Removes `record` and commits. Returns whether the variant deleted anything.
    fn delete(&mut self, record: &Record) -> RepoResult<bool>;

    /// Typed variant of `get_all`.
    fn get_all_as<T: Model>(&self) -> RepoResult<Vec<T>>
    where
        Self: Sized,
    {
        self.get_all(T::MODEL_NAME)?
            .iter()
            .map(|record| record.to_model::<T>().map_err(RepoError::from))
            .collect()
    }

    /// Typed variant of `get`.
    fn get_as<T: Model>(&self, obj_id: &str) -> RepoResult<Option<T>>
    where
        Self: Sized,
    {
        match self.get(T::MODEL_NAME, obj_id)? {
            Some(record) => Ok(Some(record.to_model()?)),
            None => Ok(None),
        }
    }

    /// Typed variant of `save`.
    fn save_model<T: Model>(&mut self, model: &T) -> RepoResult<()>
    where
        Self: Sized,
    {
        self.save(&Record::from_model(model)?)
    }
}

/// Validates a model name and resolves it through `registry`.
///
/// Blank names are rejected before lookup.
pub(crate) fn resolve_model<'r>(
    registry: &'r ModelRegistry,
    model_name: &str,
) -> RepoResult<&'r ModelDescriptor> {
    if model_name.trim().is_empty() {
        return Err(RepoError::InvalidModelName(model_name.to_string()));
    }
    registry
        .resolve(model_name)
        .ok_or_else(|| RepoError::InvalidModelName(model_name.to_string()))
}
