// tests/collector_tests.rs

//! Live-collection sanity checks and digest behaviour.

use procwatch::collector::ProcessCollector;
use procwatch::collector::hash::hash_file;
use sha2::{Digest, Sha256};
use std::collections::HashSet;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn collect_returns_only_valid_snapshots_with_unique_pids() {
    let mut collector = ProcessCollector::new(1024);
    let batch = collector.collect();
    assert!(!batch.is_empty(), "expected at least one visible process");

    let mut pids = HashSet::new();
    for snap in &batch {
        assert!(snap.valid, "{snap} should have been filtered out");
        assert!(!snap.path.is_empty());
        assert_ne!(snap.path, "/");
        assert!(pids.insert(snap.pid), "duplicate pid {}", snap.pid);
        if !snap.exists || !snap.accessible {
            assert!(
                snap.digest.is_empty(),
                "{snap} has a digest without a readable executable"
            );
        }
    }
}

#[test]
fn digest_matches_the_reference_hash_of_the_file_bytes() {
    let payload = b"#!/bin/sh\necho procwatch digest fixture\n";
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(payload).unwrap();
    file.flush().unwrap();

    let expected = hex::encode(Sha256::digest(payload));
    assert_eq!(hash_file(file.path(), 16).unwrap(), expected);
}

#[test]
fn recomputing_an_unchanged_file_yields_the_same_digest() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(b"stable contents").unwrap();
    file.flush().unwrap();

    let first = hash_file(file.path(), 1024).unwrap();
    let second = hash_file(file.path(), 1024).unwrap();
    assert_eq!(first, second);
}
