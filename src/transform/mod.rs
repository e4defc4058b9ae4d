//! The image transform collaborator.
//!
//! The scheduler treats transforms as opaque: decode + resize + encode for a
//! single job, returning the written path or a per-job error. Alternate
//! implementations are injected through [`ImageTransform`] (tests use this to
//! inject failures and delays).

use crate::core::{Config, ConversionJob};
use crate::utils::{ConvertError, ConvertResult, ensure_parent_dir};
use image::imageops::FilterType;
use std::path::PathBuf;
use tracing::debug;

/// Performs the pixel work for one job.
pub trait ImageTransform: Send + Sync {
    /// Writes exactly one output file, or fails with a decode,
    /// unsupported-format, or IO error.
    fn transform(&self, job: &ConversionJob, config: &Config) -> ConvertResult<PathBuf>;
}

/// Default transform backed by the `image` crate.
///
/// Output keeps the source format; target dimensions are the source
/// dimensions scaled by (target scale / source scale factor), clamped to at
/// least one pixel per axis.
#[derive(Debug, Default)]
pub struct RasterTransform;

impl ImageTransform for RasterTransform {
    fn transform(&self, job: &ConversionJob, config: &Config) -> ConvertResult<PathBuf> {
        let dst_root = config.dst_root.as_ref().ok_or_else(|| {
            ConvertError::processing("No destination root configured for job execution")
        })?;

        let img = image::open(&job.source)?;
        let ratio = job.scale_ratio(config.scale.base_factor());
        let width = ((img.width() as f32 * ratio).round() as u32).max(1);
        let height = ((img.height() as f32 * ratio).round() as u32).max(1);

        let resized = img.resize_exact(width, height, FilterType::Lanczos3);
        let output = job.output_path(dst_root)?;
        ensure_parent_dir(&output)?;
        resized.save(&output)?;

        debug!(
            "Converted {} -> {} ({}x{})",
            job.source.display(),
            output.display(),
            width,
            height
        );
        Ok(output)
    }
}
