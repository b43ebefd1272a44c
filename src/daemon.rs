// src/daemon.rs

//! The sequential monitoring cycle: collect → append → detect → deliver.
//!
//! One logical thread; the next cycle's collection does not begin until
//! the previous cycle's delivery has returned or failed. A storage write
//! failure propagates out of the loop: a monitoring daemon that cannot
//! record state must not silently continue. A detection failure only
//! skips that cycle's alerting.

use crate::alert::{self, AlertSink};
use crate::collector::ProcessCollector;
use crate::config::Config;
use crate::detect;
use crate::store::{SnapshotStore, StoreError};
use chrono::Utc;
use std::thread;

/// One full pass: snapshot the process table, persist it, query for
/// anomalies, and hand any alerts to the sinks.
pub fn run_cycle(
    collector: &mut ProcessCollector,
    store: &mut SnapshotStore,
    sinks: &mut [Box<dyn AlertSink>],
) -> Result<(), StoreError> {
    log::debug!("Performing process checks");
    let batch = collector.collect();
    let inserted = store.append(&batch, Utc::now())?;
    log::debug!("Recorded {} process snapshot(s)", inserted);

    let alerts = match detect::run_all(store) {
        Ok(alerts) => alerts,
        Err(e) => {
            log::error!("Detection pass aborted, skipping alerting for this cycle: {}", e);
            return Ok(());
        }
    };
    if !alerts.is_empty() {
        log::info!("{} alert(s) raised", alerts.len());
        alert::dispatch(sinks, &alerts);
    }
    Ok(())
}

/// Run cycles forever, sleeping the configured interval between them.
/// Only a storage write failure returns.
pub fn run_loop(
    config: &Config,
    collector: &mut ProcessCollector,
    store: &mut SnapshotStore,
    sinks: &mut [Box<dyn AlertSink>],
) -> Result<(), StoreError> {
    log::info!(
        "Monitoring every {}",
        humantime::format_duration(config.refresh_interval)
    );
    loop {
        run_cycle(collector, store, sinks)?;
        thread::sleep(config.refresh_interval);
    }
}

/// Single verification pass: collect, print a sample, persist, and print
/// whatever the detectors find. No alerts are delivered.
pub fn run_smoke(
    collector: &mut ProcessCollector,
    store: &mut SnapshotStore,
) -> Result<(), StoreError> {
    let batch = collector.collect();
    println!("Collected {} process snapshot(s)", batch.len());
    for snap in batch.iter().take(5) {
        match serde_json::to_string(snap) {
            Ok(json) => println!("  {json}"),
            Err(e) => println!("  <unserializable snapshot: {e}>"),
        }
    }

    store.append(&batch, Utc::now())?;
    println!("History now holds {} row(s)", store.row_count()?);

    match detect::run_all(store) {
        Ok(alerts) => {
            println!("Found {} alert(s)", alerts.len());
            for alert in alerts.iter().take(5) {
                println!("  {alert}");
            }
        }
        Err(e) => eprintln!("Detection pass failed: {e}"),
    }
    Ok(())
}
