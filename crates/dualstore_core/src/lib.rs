//! Repository layer that routes CRUD calls to a SQLite-backed unit of work
//! or to a file-backed placeholder, depending on process configuration.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;

pub use config::{
    parse_flag, RepoConfig, DB_PATH_ENV_VAR, LOG_DIR_ENV_VAR, USE_DATABASE_ENV_VAR,
};
pub use logging::{default_log_level, flush_logging, init_logging, logging_status};
pub use model::record::{Model, Record};
pub use model::registry::{ModelDescriptor, ModelRegistry, RegistryError};
pub use repo::configured::ConfiguredRepository;
pub use repo::db_repo::DbRepository;
pub use repo::error::{RepoError, RepoResult};
pub use repo::file_repo::FileRepository;
pub use repo::session::Session;
pub use repo::Repository;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
