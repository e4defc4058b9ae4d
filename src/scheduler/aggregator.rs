//! Thread-safe accumulation of per-job results into the finish report.

use crate::core::{ConvertCallback, FinishReport, JobFailure, JobOutcome};
use std::fmt::Write as _;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Instant;
use tracing::{debug, warn};

/// Owns the only mutable state shared across workers during a run.
///
/// Workers report through [`record_result`](Self::record_result); they never
/// touch the counters or the failure list directly. The orchestrator calls
/// [`finish`](Self::finish) exactly once after the terminal condition.
pub struct ResultAggregator {
    total: usize,
    verbose: bool,
    completed: AtomicUsize,
    failures: Mutex<Vec<JobFailure>>,
    log: Mutex<String>,
    started: Instant,
    callback: Arc<dyn ConvertCallback>,
}

impl ResultAggregator {
    pub fn new(total: usize, verbose: bool, callback: Arc<dyn ConvertCallback>) -> Self {
        Self {
            total,
            verbose,
            completed: AtomicUsize::new(0),
            failures: Mutex::new(Vec::new()),
            log: Mutex::new(String::new()),
            started: Instant::now(),
            callback,
        }
    }

    /// Records one job outcome and emits a progress notification.
    ///
    /// Safe to call concurrently from any worker. The progress callback is
    /// invoked outside of any lock so a slow listener only delays the
    /// reporting worker.
    pub fn record_result(&self, outcome: JobOutcome) {
        let completed = self.completed.fetch_add(1, Ordering::SeqCst) + 1;

        match outcome {
            JobOutcome::Success { job, output } => {
                debug!("Job {}/{} done: {}", completed, self.total, output.display());
                if self.verbose {
                    self.append_log(format!(
                        "converted {} -> {}",
                        job.describe(),
                        output.display()
                    ));
                }
            }
            JobOutcome::Failure { job, error } => {
                warn!("Job failed: {}: {}", job.describe(), error);
                self.append_log(format!("failed {}: {}", job.describe(), error));
                self.failures
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .push(JobFailure { job, error });
            }
        }

        let fraction = if self.total == 0 {
            1.0
        } else {
            completed as f32 / self.total as f32
        };
        self.callback.on_progress(fraction);
    }

    /// Number of jobs recorded so far
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Takes the terminal snapshot of the run.
    ///
    /// Called once by the orchestrator after all jobs have been attempted or
    /// the in-flight work has drained following a halt.
    pub fn finish(&self, halted: bool) -> FinishReport {
        let finished_jobs = self.completed();
        let failures = std::mem::take(
            &mut *self
                .failures
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
        );
        let elapsed_ms = self.started.elapsed().as_millis() as u64;

        let mut log = std::mem::take(
            &mut *self.log.lock().unwrap_or_else(PoisonError::into_inner),
        );
        let _ = write!(
            log,
            "finished {}/{} jobs in {} ms ({} failed)",
            finished_jobs,
            self.total,
            elapsed_ms,
            failures.len()
        );
        if halted {
            log.push_str(" [halted]");
        }
        log.push('\n');

        FinishReport {
            finished_jobs,
            failures,
            elapsed_ms,
            halted_during_process: halted,
            log,
        }
    }

    fn append_log(&self, line: String) {
        let mut log = self.log.lock().unwrap_or_else(PoisonError::into_inner);
        log.push_str(&line);
        log.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConversionJob;
    use crate::platform::Platform;
    use crate::utils::ConvertError;
    use std::path::PathBuf;

    struct RecordingCallback {
        fractions: Mutex<Vec<f32>>,
    }

    impl RecordingCallback {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                fractions: Mutex::new(Vec::new()),
            })
        }
    }

    impl ConvertCallback for RecordingCallback {
        fn on_progress(&self, fraction: f32) {
            self.fractions.lock().unwrap().push(fraction);
        }

        fn on_finished(&self, _report: FinishReport) {}
    }

    fn job(name: &str) -> ConversionJob {
        ConversionJob {
            source: PathBuf::from(name),
            platform: Platform::Ios,
            target: Platform::Ios.scales()[0],
        }
    }

    fn success(name: &str) -> JobOutcome {
        JobOutcome::Success {
            job: job(name),
            output: PathBuf::from(format!("/out/{name}")),
        }
    }

    #[test]
    fn progress_fractions_track_completed_over_total() {
        let callback = RecordingCallback::new();
        let aggregator = ResultAggregator::new(4, false, callback.clone());

        aggregator.record_result(success("a.png"));
        aggregator.record_result(success("b.png"));

        assert_eq!(*callback.fractions.lock().unwrap(), vec![0.25, 0.5]);
        assert_eq!(aggregator.completed(), 2);
    }

    #[test]
    fn zero_total_reports_full_completion() {
        let callback = RecordingCallback::new();
        let aggregator = ResultAggregator::new(0, false, callback.clone());

        aggregator.record_result(success("stray.png"));

        assert_eq!(*callback.fractions.lock().unwrap(), vec![1.0]);
    }

    #[test]
    fn failures_are_captured_not_rethrown() {
        let callback = RecordingCallback::new();
        let aggregator = ResultAggregator::new(2, false, callback);

        aggregator.record_result(success("ok.png"));
        aggregator.record_result(JobOutcome::Failure {
            job: job("bad.png"),
            error: ConvertError::decode("broken header"),
        });

        let report = aggregator.finish(false);
        assert_eq!(report.finished_jobs, 2);
        assert_eq!(report.failures.len(), 1);
        assert!(!report.halted_during_process);
        assert!(report.log.contains("failed"));
        assert!(report.log.contains("finished 2/2 jobs"));
    }

    #[test]
    fn halted_flag_is_reflected_in_the_report() {
        let aggregator = ResultAggregator::new(8, false, RecordingCallback::new());
        aggregator.record_result(success("a.png"));

        let report = aggregator.finish(true);
        assert_eq!(report.finished_jobs, 1);
        assert!(report.halted_during_process);
        assert!(report.log.contains("[halted]"));
    }

    #[test]
    fn verbose_runs_log_each_conversion() {
        let aggregator = ResultAggregator::new(1, true, RecordingCallback::new());
        aggregator.record_result(success("a.png"));

        let report = aggregator.finish(false);
        assert!(report.log.contains("converted"));
    }
}
