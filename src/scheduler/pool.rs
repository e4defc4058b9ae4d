//! Bounded concurrency executor for conversion jobs.

use crate::core::{Config, ConversionJob, JobOutcome};
use crate::scheduler::ResultAggregator;
use crate::transform::ImageTransform;
use crate::utils::ConvertError;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::Semaphore;
use tracing::{debug, warn};

/// Semaphore-gated worker pool.
///
/// One task is spawned per job, but a task acquires a permit before doing
/// any work, so at most `workers` transforms execute at any moment. The
/// transform itself runs under `spawn_blocking` since decode/encode is
/// CPU-and-IO bound.
pub struct WorkerPool {
    workers: usize,
    semaphore: Arc<Semaphore>,
    halt: Arc<AtomicBool>,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Self {
        Self {
            workers,
            semaphore: Arc::new(Semaphore::new(workers.max(1))),
            halt: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Shared halt flag; setting it prevents new job starts.
    pub fn halt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.halt)
    }

    /// Whether a halt was requested at any point
    pub fn halt_requested(&self) -> bool {
        self.halt.load(Ordering::SeqCst)
    }

    /// Runs all jobs and blocks until every job has been attempted or, after
    /// a halt, until in-flight jobs have drained.
    ///
    /// Every attempted job is reported to the aggregator exactly once; a
    /// failure in one job never prevents the others from running. An empty
    /// job list or a zero worker count completes immediately.
    pub async fn run(
        &self,
        jobs: Vec<ConversionJob>,
        config: Arc<Config>,
        transform: Arc<dyn ImageTransform>,
        aggregator: Arc<ResultAggregator>,
    ) {
        if self.workers == 0 || jobs.is_empty() {
            debug!("Nothing to run: {} jobs, {} workers", jobs.len(), self.workers);
            return;
        }

        let mut handles = Vec::with_capacity(jobs.len());
        for job in jobs {
            if self.halt_requested() {
                debug!("Halt requested, not queueing further jobs");
                break;
            }

            let semaphore = Arc::clone(&self.semaphore);
            let halt = Arc::clone(&self.halt);
            let config = Arc::clone(&config);
            let transform = Arc::clone(&transform);
            let aggregator = Arc::clone(&aggregator);

            handles.push(tokio::spawn(async move {
                // Closed semaphore cannot happen while the pool is alive;
                // treat it like a halt if it ever does.
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return;
                };
                if halt.load(Ordering::SeqCst) {
                    debug!("Halt requested, skipping {}", job.describe());
                    return;
                }

                let blocking_job = job.clone();
                let result = tokio::task::spawn_blocking(move || {
                    transform.transform(&blocking_job, &config)
                })
                .await;

                let outcome = match result {
                    Ok(Ok(output)) => JobOutcome::Success { job, output },
                    Ok(Err(error)) => JobOutcome::Failure { job, error },
                    Err(join_err) => JobOutcome::Failure {
                        job,
                        error: ConvertError::processing(format!(
                            "Transform task aborted: {}",
                            join_err
                        )),
                    },
                };
                aggregator.record_result(outcome);
            }));
        }

        for handle in handles {
            if let Err(e) = handle.await {
                warn!("Worker task failed to join: {}", e);
            }
        }
    }
}
