// src/collector/mod.rs

//! Live process-table collection.
//!
//! Walks every process visible to the current user, resolves its executable
//! path, and hashes the backing file. Processes that vanish or cannot be
//! inspected mid-walk are degraded locally and never surface as errors:
//! the returned batch contains only snapshots worth persisting.

pub mod hash;
pub mod snapshot;

pub use snapshot::ProcessSnapshot;

use std::{fs, io::ErrorKind, path::Path};
use sysinfo::{
    ProcessRefreshKind, ProcessStatus, ProcessesToUpdate, RefreshKind, System, UpdateKind,
};

/// Walks the OS process table once per `collect` call.
pub struct ProcessCollector {
    system: System,
    chunk_size: usize,
}

impl ProcessCollector {
    pub fn new(chunk_size: usize) -> Self {
        let system = System::new_with_specifics(
            RefreshKind::nothing().with_processes(process_refresh_kind()),
        );
        ProcessCollector { system, chunk_size }
    }

    /// Enumerate every visible process and return one snapshot per process
    /// that is meaningful enough to persist. Order is whatever the OS
    /// enumeration yields; callers must not depend on it.
    pub fn collect(&mut self) -> Vec<ProcessSnapshot> {
        self.system
            .refresh_processes_specifics(ProcessesToUpdate::All, true, process_refresh_kind());

        let mut batch = Vec::new();
        for process in self.system.processes().values() {
            let name = process.name().to_string_lossy().into_owned();
            let pid = process.pid().as_u32();

            if matches!(process.status(), ProcessStatus::Zombie) {
                log::debug!("{} ({}) is a zombie process", name, pid);
                continue;
            }

            let ppid = process.parent().map(|p| p.as_u32()).unwrap_or(0);
            // Kernel threads and processes we lack privilege to inspect
            // resolve to no executable at all; the empty path marks the
            // snapshot invalid and it is filtered below.
            let path = process
                .exe()
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default();

            let mut snap = ProcessSnapshot::new(pid, ppid, name, path);
            if snap.valid {
                self.attach_digest(&mut snap);
            } else {
                log::debug!("{} is not an inspectable process", snap);
            }
            batch.push(snap);
        }

        batch.retain(|s| s.valid);
        batch
    }

    /// Stat and hash the snapshot's executable, mapping failures onto the
    /// `exists`/`accessible` flags instead of errors.
    fn attach_digest(&self, snap: &mut ProcessSnapshot) {
        let path = Path::new(&snap.path);
        snap.exists = path.exists();
        if !snap.exists {
            log::warn!("{} executable could not be found", snap);
            return;
        }

        if fs::metadata(path).map(|m| m.is_dir()).unwrap_or(false) {
            snap.accessible = false;
            return;
        }

        match hash::hash_file(path, self.chunk_size) {
            Ok(digest) => {
                snap.digest = digest;
                snap.accessible = true;
            }
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                log::warn!("{} executable file exists, but we don't have access", snap);
                snap.accessible = false;
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                // Deleted between the stat and the open; treat as missing.
                snap.exists = false;
            }
            Err(e) => {
                log::warn!("{} executable could not be hashed: {}", snap, e);
                snap.accessible = false;
            }
        }
    }
}

fn process_refresh_kind() -> ProcessRefreshKind {
    ProcessRefreshKind::nothing().with_exe(UpdateKind::Always)
}
