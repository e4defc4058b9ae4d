//! The conversion job scheduler.
//!
//! Expands a configuration into independent jobs, runs them under a bounded
//! worker pool, aggregates per-job results without aborting the batch, and
//! reports one terminal outcome through the caller's callback.

pub mod expander;

mod aggregator;
mod converter;
mod pool;

pub use aggregator::ResultAggregator;
pub use converter::{Converter, ConverterHandle};
pub use expander::expand;
pub use pool::WorkerPool;
