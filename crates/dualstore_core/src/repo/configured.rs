//! Configuration-driven choice between the repository variants.
//!
//! # Invariants
//! - The variant is fixed at construction; each call runs exactly one path.
//! - In file mode the supplied session is dropped without being used.

use crate::config::RepoConfig;
use crate::model::record::Record;
use crate::model::registry::ModelRegistry;
use crate::repo::db_repo::DbRepository;
use crate::repo::error::RepoResult;
use crate::repo::file_repo::FileRepository;
use crate::repo::session::Session;
use crate::repo::Repository;
use log::info;

/// Repository whose variant follows the `USE_DATABASE` toggle.
pub enum ConfiguredRepository<'conn> {
    Database(DbRepository<'conn>),
    File(FileRepository),
}

impl<'conn> ConfiguredRepository<'conn> {
    /// Builds the variant selected by `config.use_database`.
    pub fn from_config(
        config: &RepoConfig,
        session: Session<'conn>,
        registry: ModelRegistry,
    ) -> Self {
        info!(
            "event=repo_init module=repo status=ok mode={} models={}",
            config.mode_label(),
            registry.len()
        );
        if config.use_database {
            Self::Database(DbRepository::new(session, registry))
        } else {
            Self::File(FileRepository::new(registry))
        }
    }

    /// Builds the file-backed variant directly, for hosts that skip opening
    /// a database when the toggle is off.
    pub fn file(registry: ModelRegistry) -> Self {
        info!(
            "event=repo_init module=repo status=ok mode=file models={}",
            registry.len()
        );
        Self::File(FileRepository::new(registry))
    }

    pub fn uses_database(&self) -> bool {
        matches!(self, Self::Database(_))
    }

    pub fn registry(&self) -> &ModelRegistry {
        match self {
            Self::Database(repo) => repo.registry(),
            Self::File(repo) => repo.registry(),
        }
    }

    /// Session access; `None` in file mode.
    pub fn session_mut(&mut self) -> Option<&mut Session<'conn>> {
        match self {
            Self::Database(repo) => Some(repo.session_mut()),
            Self::File(_) => None,
        }
    }
}

impl Repository for ConfiguredRepository<'_> {
    fn get_all(&self, model_name: &str) -> RepoResult<Vec<Record>> {
        match self {
            Self::Database(repo) => repo.get_all(model_name),
            Self::File(repo) => repo.get_all(model_name),
        }
    }

    fn get(&self, model_name: &str, obj_id: &str) -> RepoResult<Option<Record>> {
        match self {
            Self::Database(repo) => repo.get(model_name, obj_id),
            Self::File(repo) => repo.get(model_name, obj_id),
        }
    }

    fn reload(&mut self) -> RepoResult<()> {
        match self {
            Self::Database(repo) => repo.reload(),
            Self::File(repo) => repo.reload(),
        }
    }

    fn save(&mut self, record: &Record) -> RepoResult<()> {
        match self {
            Self::Database(repo) => repo.save(record),
            Self::File(repo) => repo.save(record),
        }
    }

    fn update(&mut self, record: Record) -> RepoResult<Record> {
        match self {
            Self::Database(repo) => repo.update(record),
            Self::File(repo) => repo.update(record),
        }
    }

    fn delete(&mut self, record: &Record) -> RepoResult<bool> {
        match self {
            Self::Database(repo) => repo.delete(record),
            Self::File(repo) => repo.delete(record),
        }
    }
}
