//! File-backed repository variant.
//!
//! No file format exists yet, so every operation is a no-op with a fixed
//! result:
//!
//! | operation | result          |
//! |-----------|-----------------|
//! | `get_all` | empty vec       |
//! | `get`     | `None`          |
//! | `reload`  | `Ok(())`        |
//! | `save`    | `Ok(())`        |
//! | `update`  | the given record|
//! | `delete`  | `false`         |
//!
//! Model names are still validated against the registry.

use crate::model::record::Record;
use crate::model::registry::ModelRegistry;
use crate::repo::error::RepoResult;
use crate::repo::{resolve_model, Repository};
use log::trace;

/// Placeholder repository that performs no I/O.
#[derive(Debug, Clone, Default)]
pub struct FileRepository {
    registry: ModelRegistry,
}

impl FileRepository {
    pub fn new(registry: ModelRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }
}

impl Repository for FileRepository {
    fn get_all(&self, model_name: &str) -> RepoResult<Vec<Record>> {
        resolve_model(&self.registry, model_name)?;
        trace!("event=repo_get_all module=repo status=noop mode=file model={model_name}");
        Ok(Vec::new())
    }

    fn get(&self, model_name: &str, _obj_id: &str) -> RepoResult<Option<Record>> {
        resolve_model(&self.registry, model_name)?;
        Ok(None)
    }

    fn reload(&mut self) -> RepoResult<()> {
        Ok(())
    }

    fn save(&mut self, record: &Record) -> RepoResult<()> {
        resolve_model(&self.registry, &record.model)?;
        trace!(
            "event=repo_save module=repo status=noop mode=file model={}",
            record.model
        );
        Ok(())
    }

    fn update(&mut self, record: Record) -> RepoResult<Record> {
        resolve_model(&self.registry, &record.model)?;
        Ok(record)
    }

    fn delete(&mut self, record: &Record) -> RepoResult<bool> {
        resolve_model(&self.registry, &record.model)?;
        Ok(false)
    }
}
