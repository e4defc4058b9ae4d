// Module declarations in dependency order
pub mod utils;
pub mod platform;
pub mod core;
pub mod transform;
pub mod scheduler;
pub mod cli;

// Public exports for external consumers
pub use crate::core::{
    Config, ConversionJob, ConvertCallback, FinishReport, JobFailure, JobOutcome, ScaleSpec,
};
pub use crate::platform::{OutputTarget, Platform, PlatformSet};
pub use crate::scheduler::{Converter, ConverterHandle};
pub use crate::transform::{ImageTransform, RasterTransform};
pub use crate::utils::{ConvertError, ConvertResult};

// This library file is used as a public API for consuming this crate as a library.
// The actual application entry point is in main.rs.
