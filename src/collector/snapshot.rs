// src/collector/snapshot.rs

//! Point-in-time record of a single observed process.

use serde::Serialize;
use std::fmt;

/// Metadata for one running process at observation time.
///
/// Snapshots are created fresh each cycle, written once to the history
/// store, and never mutated after insertion. `valid` is derived from the
/// executable path at construction: an empty path or the filesystem root
/// can only come from a mis-resolved lookup and must never be treated as a
/// real executable.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessSnapshot {
    pub pid: u32,
    /// Parent process id, 0 if unknown.
    pub ppid: u32,
    pub name: String,
    /// Absolute path to the executable; empty if unknown.
    pub path: String,
    /// Hex SHA-256 of the executable's content; empty if not computed.
    pub digest: String,
    /// Whether `path` currently resolves on disk.
    pub exists: bool,
    /// Whether this snapshot is meaningful enough to persist.
    pub valid: bool,
    /// Whether the executable's bytes could be read for hashing.
    pub accessible: bool,
}

impl ProcessSnapshot {
    pub fn new(pid: u32, ppid: u32, name: String, path: String) -> Self {
        let valid = !path.is_empty() && path != "/";
        ProcessSnapshot {
            pid,
            ppid,
            name,
            path,
            digest: String::new(),
            exists: false,
            valid,
            accessible: true,
        }
    }
}

impl fmt::Display for ProcessSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.pid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_path_is_invalid() {
        assert!(!ProcessSnapshot::new(1, 0, "init".into(), "/".into()).valid);
    }

    #[test]
    fn empty_path_is_invalid() {
        assert!(!ProcessSnapshot::new(2, 0, "kthreadd".into(), String::new()).valid);
    }

    #[test]
    fn regular_path_is_valid() {
        let snap = ProcessSnapshot::new(42, 1, "bash".into(), "/usr/bin/bash".into());
        assert!(snap.valid);
        assert!(snap.accessible);
        assert!(snap.digest.is_empty());
        assert!(!snap.exists);
    }

    #[test]
    fn displays_like_a_process_listing() {
        let snap = ProcessSnapshot::new(42, 1, "bash".into(), "/usr/bin/bash".into());
        assert_eq!(snap.to_string(), "bash (42)");
    }
}
