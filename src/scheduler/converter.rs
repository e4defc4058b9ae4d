//! The run orchestrator: validation, expansion, pool start, terminal report.

use crate::core::{Config, ConvertCallback};
use crate::scheduler::{ResultAggregator, WorkerPool, expander};
use crate::transform::{ImageTransform, RasterTransform};
use crate::utils::ConvertResult;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info};

/// Entry point for conversion runs.
///
/// Holds the image transform collaborator; everything else is per-run state.
pub struct Converter {
    transform: Arc<dyn ImageTransform>,
}

impl Converter {
    pub fn new() -> Self {
        Self {
            transform: Arc::new(RasterTransform),
        }
    }

    /// Uses a custom transform instead of [`RasterTransform`]
    pub fn with_transform(transform: Arc<dyn ImageTransform>) -> Self {
        Self { transform }
    }

    /// Starts a conversion run and returns without blocking the caller.
    ///
    /// Configuration errors are the only synchronous failure; they abort
    /// before any job is scheduled. Everything afterwards arrives through
    /// the callback: zero or more progress notifications followed by exactly
    /// one finish notification, even for zero-job runs.
    ///
    /// Must be called within a tokio runtime.
    pub fn execute(
        &self,
        config: Config,
        verbose: bool,
        callback: Arc<dyn ConvertCallback>,
    ) -> ConvertResult<ConverterHandle> {
        if !config.skip_validation {
            config.validate()?;
        }

        let jobs = expander::expand(&config);
        let total = jobs.len();
        info!(
            "Scheduling {} conversion jobs across {} workers",
            total, config.workers
        );

        let aggregator = Arc::new(ResultAggregator::new(total, verbose, Arc::clone(&callback)));
        let pool = WorkerPool::new(config.workers);
        let handle = ConverterHandle {
            halt: pool.halt_flag(),
        };

        let transform = Arc::clone(&self.transform);
        let config = Arc::new(config);
        tokio::spawn(async move {
            pool.run(jobs, config, transform, Arc::clone(&aggregator)).await;

            // Halt only counts if it actually cut the run short.
            let halted = pool.halt_requested() && aggregator.completed() < total;
            let report = aggregator.finish(halted);
            debug!(
                "Run finished: {}/{} jobs, {} failures, halted: {}",
                report.finished_jobs,
                total,
                report.failures.len(),
                halted
            );
            callback.on_finished(report);
        });

        Ok(handle)
    }
}

impl Default for Converter {
    fn default() -> Self {
        Self::new()
    }
}

/// Caller-side handle to a running conversion.
///
/// Halting is cooperative: in-flight jobs finish, queued jobs are skipped,
/// and the finish callback still fires with the halted flag set.
pub struct ConverterHandle {
    halt: Arc<AtomicBool>,
}

impl ConverterHandle {
    /// Requests early termination of the run.
    pub fn halt(&self) {
        info!("Halt requested");
        self.halt.store(true, Ordering::SeqCst);
    }

    pub fn halt_requested(&self) -> bool {
        self.halt.load(Ordering::SeqCst)
    }
}
