// src/store/mod.rs

//! Append-only process history over SQLite.
//!
//! Rows are inserted once per cycle and never updated or deleted; the
//! anomaly queries depend on that accumulation. The schema (and its four
//! query-supporting indexes) is applied idempotently on every open.

pub mod connection;

use crate::collector::ProcessSnapshot;
use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use std::path::Path;
use thiserror::Error;

const SCHEMA: &str = include_str!("../../resources/schema.sql");

const INSERT_SQL: &str = "INSERT INTO processes \
       (id, ppid, updated_at, name, path, valid, hash, accessible, file_exists) \
     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sql(#[from] rusqlite::Error),
}

/// The append-only snapshot history. A single connection, accessed only by
/// the sequential cycle loop; no locking discipline beyond SQLite's own
/// transaction guarantees is required.
pub struct SnapshotStore {
    conn: Connection,
}

impl SnapshotStore {
    /// Open (creating if absent) the history database at `path` in WAL
    /// mode and make sure the schema exists.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = connection::open_db_connection(path)?;
        let store = SnapshotStore { conn };
        store.ensure_schema()?;
        log::info!("Database ready at {}", path.display());
        Ok(store)
    }

    /// Idempotently create the history table and its indexes.
    pub fn ensure_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Insert one row per valid snapshot, all stamped with `observed_at`,
    /// inside a single transaction. Returns the number of rows written.
    ///
    /// Empty `path`/`digest` strings are bound as NULL so the detection
    /// queries' `IS NOT NULL` filters carry their intended meaning.
    pub fn append(
        &mut self,
        batch: &[ProcessSnapshot],
        observed_at: DateTime<Utc>,
    ) -> Result<usize, StoreError> {
        let tx = self.conn.transaction()?;
        let mut inserted = 0;
        {
            let mut stmt = tx.prepare_cached(INSERT_SQL)?;
            for snap in batch.iter().filter(|s| s.valid) {
                stmt.execute(params![
                    snap.pid as i64,
                    snap.ppid as i64,
                    observed_at,
                    snap.name,
                    (!snap.path.is_empty()).then_some(snap.path.as_str()),
                    snap.valid,
                    (!snap.digest.is_empty()).then_some(snap.digest.as_str()),
                    snap.accessible,
                    snap.exists,
                ])?;
                inserted += 1;
            }
        }
        tx.commit()?;
        Ok(inserted)
    }

    /// Total rows accumulated across all cycles.
    pub fn row_count(&self) -> Result<i64, StoreError> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM processes", [], |r| r.get(0))?;
        Ok(count)
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.conn
    }
}
