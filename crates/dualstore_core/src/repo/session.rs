//! Unit-of-work session over a borrowed SQLite connection.
//!
//! # Responsibility
//! - Buffer pending record writes until `commit`.
//! - Apply a commit atomically, or discard the buffer on `rollback`.
//! - Serve reads of committed rows.
//!
//! # Invariants
//! - Reads never observe buffered writes.
//! - A commit applies all buffered operations in one transaction, in the
//!   order they were staged, or none of them.
//! - After `commit` returns (either way) the buffer is empty.

use crate::model::record::Record;
use crate::model::registry::ModelDescriptor;
use crate::repo::error::{RepoError, RepoResult};
use log::{debug, error, info};
use rusqlite::{params, Connection, Row};
use std::time::Instant;

const RECORD_SELECT_SQL: &str = "SELECT model, id, payload FROM records";

#[derive(Debug, Clone, PartialEq)]
enum PendingOp {
    Upsert(Record),
    Update(Record),
    Remove { model: String, id: String },
}

/// Scoped session; its lifetime is bounded by the connection borrow.
pub struct Session<'conn> {
    conn: &'conn Connection,
    pending: Vec<PendingOp>,
}

impl<'conn> Session<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self {
            conn,
            pending: Vec::new(),
        }
    }

    /// Stages an insert-or-replace of `record`.
    pub fn add(&mut self, record: Record) {
        self.pending.push(PendingOp::Upsert(record));
    }

    /// Stages an update of an existing row. Commit fails with `NotFound`
    /// when the row is missing.
    pub fn update(&mut self, record: Record) {
        self.pending.push(PendingOp::Update(record));
    }

    /// Stages removal of `(model, id)`. Removing a missing row is not an error.
    pub fn remove(&mut self, model: impl Into<String>, id: impl Into<String>) {
        self.pending.push(PendingOp::Remove {
            model: model.into(),
            id: id.into(),
        });
    }

    /// Number of staged operations.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Applies every staged operation in one transaction.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when a staged update targets a missing row.
    /// - `RepoError::Db` for any SQLite failure.
    ///
    /// On error nothing is written and the buffer is discarded.
    pub fn commit(&mut self) -> RepoResult<()> {
        let started_at = Instant::now();
        let ops = std::mem::take(&mut self.pending);
        let op_count = ops.len();

        match self.apply(ops) {
            Ok(()) => {
                info!(
                    "event=session_commit module=repo status=ok ops={op_count} duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=session_commit module=repo status=error ops={op_count} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err)
            }
        }
    }

    /// Discards every staged operation.
    pub fn rollback(&mut self) {
        let discarded = self.pending.len();
        self.pending.clear();
        debug!("event=session_rollback module=repo status=ok discarded={discarded}");
    }

    /// Reads all committed records of one model in insertion order.
    pub fn query_all(&self, descriptor: &ModelDescriptor) -> RepoResult<Vec<Record>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RECORD_SELECT_SQL} WHERE model = ?1 ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([descriptor.name()])?;
        let mut records = Vec::new();

        while let Some(row) = rows.next()? {
            records.push(parse_record_row(row)?);
        }

        Ok(records)
    }

    /// Reads one committed record by primary key.
    pub fn query_get(&self, descriptor: &ModelDescriptor, id: &str) -> RepoResult<Option<Record>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{RECORD_SELECT_SQL} WHERE model = ?1 AND id = ?2;"))?;
        let mut rows = stmt.query(params![descriptor.name(), id])?;

        match rows.next()? {
            Some(row) => Ok(Some(parse_record_row(row)?)),
            None => Ok(None),
        }
    }

    fn apply(&self, ops: Vec<PendingOp>) -> RepoResult<()> {
        let tx = self.conn.unchecked_transaction()?;

        for op in ops {
            match op {
                PendingOp::Upsert(record) => {
                    tx.execute(
                        "INSERT INTO records (model, id, payload)
                         VALUES (?1, ?2, ?3)
                         ON CONFLICT (model, id) DO UPDATE SET
                            payload = excluded.payload,
                            updated_at = (strftime('%s', 'now') * 1000);",
                        params![record.model, record.id, serde_json::to_string(&record.data)?],
                    )?;
                }
                PendingOp::Update(record) => {
                    let changed = tx.execute(
                        "UPDATE records
                         SET
                            payload = ?3,
                            updated_at = (strftime('%s', 'now') * 1000)
                         WHERE model = ?1 AND id = ?2;",
                        params![record.model, record.id, serde_json::to_string(&record.data)?],
                    )?;
                    if changed == 0 {
                        return Err(RepoError::NotFound {
                            model: record.model,
                            id: record.id,
                        });
                    }
                }
                PendingOp::Remove { model, id } => {
                    tx.execute(
                        "DELETE FROM records WHERE model = ?1 AND id = ?2;",
                        params![model, id],
                    )?;
                }
            }
        }

        tx.commit()?;
        Ok(())
    }
}

fn parse_record_row(row: &Row<'_>) -> RepoResult<Record> {
    let model: String = row.get("model")?;
    let id: String = row.get("id")?;
    let payload: String = row.get("payload")?;
    let data = serde_json::from_str(&payload).map_err(|err| {
        RepoError::InvalidData(format!(
            "payload of {model} `{id}` is not valid JSON: {err}"
        ))
    })?;

    Ok(Record { model, id, data })
}

#[cfg(test)]
mod tests {
    use super::Session;
    use crate::db::open_db_in_memory;
    use crate::model::record::Record;
    use crate::model::registry::ModelRegistry;
    use crate::repo::error::RepoError;
    use serde_json::json;

    fn registry() -> ModelRegistry {
        ModelRegistry::new().with("City").unwrap()
    }

    #[test]
    fn staged_writes_are_invisible_until_commit() {
        let conn = open_db_in_memory().unwrap();
        let registry = registry();
        let city = registry.resolve("City").unwrap();
        let mut session = Session::new(&conn);

        session.add(Record::with_id("City", "sf", json!({ "name": "San Francisco" })));
        assert_eq!(session.pending_len(), 1);
        assert!(session.query_get(city, "sf").unwrap().is_none());

        session.commit().unwrap();
        assert_eq!(session.pending_len(), 0);
        let loaded = session.query_get(city, "sf").unwrap().unwrap();
        assert_eq!(loaded.data["name"], "San Francisco");
    }

    #[test]
    fn rollback_discards_staged_writes() {
        let conn = open_db_in_memory().unwrap();
        let registry = registry();
        let city = registry.resolve("City").unwrap();
        let mut session = Session::new(&conn);

        session.add(Record::with_id("City", "nyc", json!({})));
        session.remove("City", "nyc");
        session.rollback();
        assert_eq!(session.pending_len(), 0);

        session.commit().unwrap();
        assert!(session.query_all(city).unwrap().is_empty());
    }

    #[test]
    fn failed_commit_writes_nothing_and_clears_buffer() {
        let conn = open_db_in_memory().unwrap();
        let registry = registry();
        let city = registry.resolve("City").unwrap();
        let mut session = Session::new(&conn);

        session.add(Record::with_id("City", "la", json!({ "name": "Los Angeles" })));
        session.update(Record::with_id("City", "missing", json!({})));

        let err = session.commit().unwrap_err();
        assert!(matches!(err, RepoError::NotFound { ref id, .. } if id == "missing"));
        assert_eq!(session.pending_len(), 0);
        assert!(session.query_get(city, "la").unwrap().is_none());
    }

    #[test]
    fn corrupt_payload_is_reported_as_invalid_data() {
        let conn = open_db_in_memory().unwrap();
        conn.execute(
            "INSERT INTO records (model, id, payload) VALUES ('City', 'bad', '{not json');",
            [],
        )
        .unwrap();
        let registry = registry();
        let session = Session::new(&conn);

        let err = session
            .query_get(registry.resolve("City").unwrap(), "bad")
            .unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)));
    }
}
