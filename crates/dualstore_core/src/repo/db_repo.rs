//! Session-backed repository variant.
//!
//! # Invariants
//! - Every write is staged on the session and committed before returning.
//! - Reads see committed state only.

use crate::model::record::Record;
use crate::model::registry::ModelRegistry;
use crate::repo::error::RepoResult;
use crate::repo::session::Session;
use crate::repo::{resolve_model, Repository};
use log::debug;

/// Repository that forwards every call to an explicitly owned `Session`.
pub struct DbRepository<'conn> {
    session: Session<'conn>,
    registry: ModelRegistry,
}

impl<'conn> DbRepository<'conn> {
    pub fn new(session: Session<'conn>, registry: ModelRegistry) -> Self {
        Self { session, registry }
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    /// Direct access to the session, for staging changes without committing.
    pub fn session_mut(&mut self) -> &mut Session<'conn> {
        &mut self.session
    }
}

impl Repository for DbRepository<'_> {
    fn get_all(&self, model_name: &str) -> RepoResult<Vec<Record>> {
        let descriptor = resolve_model(&self.registry, model_name)?;
        let records = self.session.query_all(descriptor)?;
        debug!(
            "event=repo_get_all module=repo status=ok mode=database model={model_name} count={}",
            records.len()
        );
        Ok(records)
    }

    fn get(&self, model_name: &str, obj_id: &str) -> RepoResult<Option<Record>> {
        let descriptor = resolve_model(&self.registry, model_name)?;
        let record = self.session.query_get(descriptor, obj_id)?;
        debug!(
            "event=repo_get module=repo status=ok mode=database model={model_name} found={}",
            record.is_some()
        );
        Ok(record)
    }

    fn reload(&mut self) -> RepoResult<()> {
        self.session.rollback();
        Ok(())
    }

    fn save(&mut self, record: &Record) -> RepoResult<()> {
        resolve_model(&self.registry, &record.model)?;
        self.session.add(record.clone());
        self.session.commit()
    }

    fn update(&mut self, record: Record) -> RepoResult<Record> {
        resolve_model(&self.registry, &record.model)?;
        self.session.update(record.clone());
        self.session.commit()?;
        Ok(record)
    }

    fn delete(&mut self, record: &Record) -> RepoResult<bool> {
        resolve_model(&self.registry, &record.model)?;
        self.session.remove(record.model.as_str(), record.id.as_str());
        self.session.commit()?;
        Ok(true)
    }
}
