// src/main.rs

//! Daemon entry-point.
//!
//! 1. Parse the CLI & load configuration
//! 2. Set up structured logging
//! 3. Open the snapshot history database
//! 4. Run the monitoring loop (or a single smoke pass)
//!
// ───── std / 3rd-party imports ──────────────────────────────────────────────
use anyhow::Context;
use chrono::Local;
use clap::{Parser, Subcommand};
use fern::Dispatch;
use log::LevelFilter;
use std::path::PathBuf;

// ───── local imports ────────────────────────────────────────────────────────
use procwatch::alert;
use procwatch::collector::ProcessCollector;
use procwatch::config::{Config, load_config};
use procwatch::daemon;
use procwatch::store::SnapshotStore;

// ───── helpers ──────────────────────────────────────────────────────────────

/// Print an error with context and terminate the process.
macro_rules! fatal {
    ($ctx:expr, $($arg:tt)+) => {{
        eprintln!(
            "[{}][ERROR][{}] {}",
            chrono::Local::now().to_rfc3339(),
            $ctx,
            format!($($arg)+)
        );
        std::process::exit(1);
    }};
}

#[derive(Parser)]
#[command(name = "procwatch", version, about = "A lightweight process monitoring daemon")]
struct Cli {
    /// Path to an alternate configuration file.
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full monitoring loop.
    Daemon,
    /// Run a single collect-and-detect pass and print the results.
    Smoke,
}

/// Configure global logging as requested in `config.logging`.
fn setup_logging(config: &Config) -> Result<(), fern::InitError> {
    let level = match config.logging.level.to_uppercase().as_str() {
        "ERROR" => LevelFilter::Error,
        "WARN" => LevelFilter::Warn,
        "DEBUG" => LevelFilter::Debug,
        "TRACE" => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };

    let log_path = config
        .logging
        .enable
        .then(|| config.logging.file.as_deref().unwrap_or("procwatch.log").to_string());

    let mut dispatch = Dispatch::new()
        .format(|out, msg, record| {
            out.finish(format_args!(
                "[{}][{:5}][{}] {}",
                Local::now().to_rfc3339(),
                record.level(),
                record.target(),
                msg
            ))
        })
        .level(level)
        .chain(std::io::stdout());

    if let Some(path) = log_path {
        dispatch = dispatch.chain(fern::log_file(path)?);
    }

    dispatch.apply()?;
    Ok(())
}

// ───── daemon logic ─────────────────────────────────────────────────────────

fn run(cli: Cli, config: Config) -> anyhow::Result<()> {
    let mut store = SnapshotStore::open(&config.database_path).with_context(|| {
        format!("cannot open database file {}", config.database_path.display())
    })?;
    let mut collector = ProcessCollector::new(config.hash_chunk_size);

    match cli.command {
        Command::Daemon => {
            let mut sinks = alert::build_sinks(&config);
            daemon::run_loop(&config, &mut collector, &mut store, &mut sinks).with_context(
                || format!("cannot write to database file {}", config.database_path.display()),
            )?;
        }
        Command::Smoke => daemon::run_smoke(&mut collector, &mut store)?,
    }
    Ok(())
}

fn main() {
    let cli = Cli::parse();
    let config =
        load_config(cli.config.as_deref()).unwrap_or_else(|e| fatal!("config", "{}", e));
    setup_logging(&config).unwrap_or_else(|e| fatal!("logging", "{}", e));

    log::info!("ProcWatch monitoring service starting up");
    log::info!("Storing in database: {}", config.database_path.display());
    if config.alerts.syslog {
        log::info!("Alerting to syslog");
    }
    if config.alerts.email {
        log::info!("Alerting to email");
    }
    if config.alerts.webhook {
        log::info!("Alerting to webhook");
    }

    if let Err(e) = run(cli, config) {
        fatal!("procwatch", "{:#}", e);
    }
}
