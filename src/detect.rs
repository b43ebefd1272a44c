// src/detect.rs

//! Anomaly queries over the process history.
//!
//! Each detector is an independent read-only query; nothing one detector
//! finds influences another, and they may run in any order. A failure to
//! read the store aborts the whole pass so a cycle never emits a partial,
//! inconsistent alert set.

use crate::alert::Alert;
use crate::store::SnapshotStore;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("detection query failed: {0}")]
    Sql(#[from] rusqlite::Error),
}

/// Run every detector against the full history and concatenate the alerts.
pub fn run_all(store: &SnapshotStore) -> Result<Vec<Alert>, DetectionError> {
    let mut alerts = Vec::new();
    alerts.extend(detect_missing_executable(store)?);
    alerts.extend(detect_modified_executable(store)?);
    alerts.extend(detect_duplicate_names(store)?);
    Ok(alerts)
}

/// Processes in the latest cycle whose executable is gone from disk while
/// the file itself was never unreadable: the backing file was deleted
/// under a still-running process. Earlier cycles are ignored so a process
/// that has since regained a real executable stops alerting.
pub fn detect_missing_executable(store: &SnapshotStore) -> Result<Vec<Alert>, DetectionError> {
    let sql = "SELECT id, name, path
               FROM processes
               WHERE file_exists = 0
                 AND accessible = 1
                 AND updated_at = (SELECT MAX(updated_at) FROM processes)
               ORDER BY updated_at DESC";
    let mut stmt = store.conn().prepare(sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(Alert {
            pid: row.get::<_, i64>(0)? as u32,
            name: row.get(1)?,
            path: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
            message: "Process does not have executable on disk.".into(),
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// (pid, path) pairs whose executable content hash has taken more than one
/// value across the whole history, meaning the on-disk file changed while
/// the process kept running. This is the one detector that reasons across
/// cycles and it relies on the history never being rewritten. Rows without
/// a digest (unreadable executables) are excluded from the grouping.
pub fn detect_modified_executable(store: &SnapshotStore) -> Result<Vec<Alert>, DetectionError> {
    let sql = "SELECT id, name, path, COUNT(DISTINCT hash) AS distinct_hashes
               FROM processes
               WHERE accessible = 1
                 AND path IS NOT NULL
                 AND hash IS NOT NULL
               GROUP BY id, path
               HAVING distinct_hashes > 1
               ORDER BY distinct_hashes DESC";
    let mut stmt = store.conn().prepare(sql)?;
    let rows = stmt.query_map([], |row| {
        Ok(Alert {
            pid: row.get::<_, i64>(0)? as u32,
            name: row.get(1)?,
            path: row.get(2)?,
            message: "Process executable has been modified on disk while the process was running."
                .into(),
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// Names that appear under more than one distinct executable path in the
/// latest cycle. Can false-positive on applications that ship
/// identically-named helper binaries in several install locations.
pub fn detect_duplicate_names(store: &SnapshotStore) -> Result<Vec<Alert>, DetectionError> {
    let sql = "SELECT id, name, path, COUNT(path) AS distinct_paths
               FROM (
                   SELECT id, name, path
                   FROM processes
                   WHERE updated_at = (SELECT MAX(updated_at) FROM processes)
                     AND accessible = 1
                     AND path IS NOT NULL
                   GROUP BY name, path
               )
               GROUP BY name
               HAVING distinct_paths > 1
               ORDER BY distinct_paths DESC";
    let mut stmt = store.conn().prepare(sql)?;
    let rows = stmt.query_map([], |row| {
        let distinct_paths: i64 = row.get(3)?;
        Ok(Alert {
            pid: row.get::<_, i64>(0)? as u32,
            name: row.get(1)?,
            path: row.get(2)?,
            message: format!(
                "{} processes exist with the same name, but different paths.",
                distinct_paths
            ),
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}
