//! Core types for conversion runs.
//!
//! This module contains the fundamental types used throughout the crate:
//! - [`Config`]: Immutable per-run configuration
//! - [`ConversionJob`]: One (source, platform, scale) unit of work
//! - [`FinishReport`]: The single terminal summary of a run
//! - [`ConvertCallback`]: The caller-facing notification contract

mod config;
mod job;
mod report;

pub use config::{Config, DEFAULT_SOURCE_SCALE, DEFAULT_WORKERS, ScaleSpec};
pub use job::ConversionJob;
pub use report::{ConvertCallback, FinishReport, JobFailure, JobOutcome};
