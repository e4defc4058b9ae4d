//! Run outcomes, the finish report, and the caller-facing callback contract.

use crate::core::ConversionJob;
use crate::utils::ConvertError;
use serde::Serialize;
use std::path::PathBuf;

/// Terminal state of a single job.
#[derive(Debug)]
pub enum JobOutcome {
    /// The output file was written
    Success { job: ConversionJob, output: PathBuf },
    /// The job failed; the error is captured, never rethrown
    Failure { job: ConversionJob, error: ConvertError },
}

/// One captured per-job failure, surfaced in the finish report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobFailure {
    pub job: ConversionJob,
    pub error: ConvertError,
}

/// Immutable summary of a finished run, produced exactly once.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishReport {
    /// Number of jobs that finished, successfully or not
    pub finished_jobs: usize,
    /// All captured per-job failures
    pub failures: Vec<JobFailure>,
    /// Elapsed wall-clock time for the run in milliseconds
    pub elapsed_ms: u64,
    /// Whether the run ended via halt rather than natural completion
    pub halted_during_process: bool,
    /// Human-readable log summary
    pub log: String,
}

/// Notifications delivered to the caller during and after a run.
///
/// Implementations must be safe to call concurrently: `on_progress` fires
/// from worker tasks in arbitrary interleavings. `on_finished` is delivered
/// exactly once per run and happens-after every `on_progress` call.
pub trait ConvertCallback: Send + Sync {
    /// Completion fraction in `[0.0, 1.0]`. Fires zero or more times.
    fn on_progress(&self, _fraction: f32) {}

    /// The single terminal notification of a run.
    fn on_finished(&self, report: FinishReport);
}
