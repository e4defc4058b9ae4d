// This is the primary entry point for the densify CLI.
// The lib.rs file serves only as a public API for external consumers.

use anyhow::Context;
use clap::Parser;
use densify::cli::Cli;
use densify::core::{Config, ConvertCallback, FinishReport, ScaleSpec};
use densify::scheduler::Converter;
use densify::utils::collect_sources;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::oneshot;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Forwards the finish report to the waiting main task.
struct LatchCallback {
    tx: Mutex<Option<oneshot::Sender<FinishReport>>>,
}

impl LatchCallback {
    fn new() -> (Arc<Self>, oneshot::Receiver<FinishReport>) {
        let (tx, rx) = oneshot::channel();
        (
            Arc::new(Self {
                tx: Mutex::new(Some(tx)),
            }),
            rx,
        )
    }
}

impl ConvertCallback for LatchCallback {
    fn on_progress(&self, fraction: f32) {
        debug!("Progress: {:.0}%", fraction * 100.0);
    }

    fn on_finished(&self, report: FinishReport) {
        if let Some(tx) = self
            .tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            let _ = tx.send(report);
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Cli::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false) // Remove module path
        .with_ansi(true)    // Keep colored output
        .compact();         // Use compact formatter instead of pretty

    subscriber.init();

    let sources = collect_sources(&args.src)
        .with_context(|| format!("scanning {}", args.src.display()))?;
    info!(
        "Found {} source images under {}",
        sources.len(),
        args.src.display()
    );

    let scale = match args.scale {
        Some(factor) => ScaleSpec::Factor(factor),
        None => ScaleSpec::Default,
    };
    let config = Config::new(sources)
        .with_dst_root(&args.dst)
        .with_platforms(args.platform)
        .with_scale(scale)
        .with_workers(args.threads.unwrap_or_else(num_cpus::get))
        .with_skip_validation(args.skip_validation);

    let (callback, finished) = LatchCallback::new();
    let _handle = Converter::new().execute(config, args.verbose, callback)?;

    let report = finished.await.context("converter dropped without a finish report")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report.log);
    }

    if !report.failures.is_empty() {
        std::process::exit(1);
    }
    Ok(())
}
