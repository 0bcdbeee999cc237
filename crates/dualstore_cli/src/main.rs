//! Small command-line front end for `dualstore_core` wiring.
//!
//! Usage: `dualstore_cli [MODEL...]`
//!
//! Registers every MODEL argument, builds the repository selected by
//! `USE_DATABASE`, and prints one `model=<name> count=<n>` line per model.
//! Log events go to `DUALSTORE_LOG_DIR` (default: a temp subdirectory).

use dualstore_core::db::open_db;
use dualstore_core::{
    default_log_level, flush_logging, init_logging, ConfiguredRepository, ModelRegistry,
    RepoConfig, Repository, Session,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    let outcome = run(std::env::args().skip(1).collect());
    flush_logging();
    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("dualstore_cli: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run(models: Vec<String>) -> Result<(), String> {
    let config = RepoConfig::from_env();
    let log_dir = config.resolved_log_dir();
    init_logging(default_log_level(), &log_dir.to_string_lossy())?;

    println!("dualstore_core version={}", dualstore_core::core_version());
    println!("dualstore_core mode={}", config.mode_label());

    let mut registry = ModelRegistry::new();
    for model in &models {
        registry.register(model).map_err(|err| err.to_string())?;
    }

    let db_path = config.resolved_db_path();
    let conn = config
        .use_database
        .then(|| open_db(&db_path))
        .transpose()
        .map_err(|err| format!("opening `{}` failed: {err}", db_path.display()))?;
    let repo = match conn.as_ref() {
        Some(conn) => ConfiguredRepository::from_config(&config, Session::new(conn), registry),
        None => ConfiguredRepository::file(registry),
    };

    for model in &models {
        let records = repo.get_all(model).map_err(|err| err.to_string())?;
        println!("model={model} count={}", records.len());
    }
    Ok(())
}
