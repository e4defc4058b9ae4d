use crate::platform::PlatformSet;
use crate::utils::{ConvertResult, ValidationError, format_from_extension};
use serde::Serialize;
use std::path::PathBuf;

/// Default number of parallel conversion workers.
pub const DEFAULT_WORKERS: usize = 4;

/// Density factor sources are assumed to be authored at when no explicit
/// factor is given (xxhdpi / @3x).
pub const DEFAULT_SOURCE_SCALE: f32 = 3.0;

/// The density factor the source images are authored at.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ScaleSpec {
    Default,
    Factor(f32),
}

impl ScaleSpec {
    /// Factor the source dimensions correspond to on the density scale
    pub fn base_factor(&self) -> f32 {
        match self {
            Self::Default => DEFAULT_SOURCE_SCALE,
            Self::Factor(f) => *f,
        }
    }
}

/// Immutable configuration for one conversion run.
///
/// Built once, validated once, then shared read-only with all workers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Source image files; an empty set is a legal zero-job run
    pub sources: Vec<PathBuf>,
    /// Destination root for the output tree
    pub dst_root: Option<PathBuf>,
    /// Target platform selection
    pub platforms: PlatformSet,
    /// Density factor of the source images
    pub scale: ScaleSpec,
    /// Hard cap on concurrently executing jobs
    pub workers: usize,
    /// Bypass configuration validation
    pub skip_validation: bool,
}

impl Config {
    pub fn new(sources: Vec<PathBuf>) -> Self {
        Self {
            sources,
            dst_root: None,
            platforms: PlatformSet::All,
            scale: ScaleSpec::Default,
            workers: DEFAULT_WORKERS,
            skip_validation: false,
        }
    }

    pub fn with_dst_root(mut self, dst_root: impl Into<PathBuf>) -> Self {
        self.dst_root = Some(dst_root.into());
        self
    }

    pub fn with_platforms(mut self, platforms: PlatformSet) -> Self {
        self.platforms = platforms;
        self
    }

    pub fn with_scale(mut self, scale: ScaleSpec) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn with_skip_validation(mut self, skip: bool) -> Self {
        self.skip_validation = skip;
        self
    }

    /// Validates the configuration before any job is scheduled.
    ///
    /// This is the only validation point of a run; job execution never
    /// re-checks global configuration.
    pub fn validate(&self) -> ConvertResult<()> {
        if self.workers == 0 {
            return Err(ValidationError::settings("Worker count must be at least 1").into());
        }

        if self.scale.base_factor() <= 0.0 {
            return Err(ValidationError::settings(format!(
                "Invalid source scale factor: {}. Must be positive",
                self.scale.base_factor()
            ))
            .into());
        }

        if !self.sources.is_empty() && self.dst_root.is_none() {
            return Err(ValidationError::settings(
                "Destination root is required when source files are present",
            )
            .into());
        }

        for source in &self.sources {
            if !source.exists() {
                return Err(ValidationError::path_not_found(source).into());
            }
            if !source.is_file() {
                return Err(ValidationError::not_a_file(source).into());
            }
            format_from_extension(source)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::ConvertError;

    #[test]
    fn empty_source_set_without_destination_is_valid() {
        assert!(Config::new(vec![]).validate().is_ok());
    }

    #[test]
    fn sources_require_a_destination_root() {
        let config = Config::new(vec![PathBuf::from("a.png")]);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConvertError::Validation(_)));
    }

    #[test]
    fn rejects_zero_workers_and_non_positive_scale() {
        assert!(Config::new(vec![]).with_workers(0).validate().is_err());
        assert!(
            Config::new(vec![])
                .with_scale(ScaleSpec::Factor(0.0))
                .validate()
                .is_err()
        );
        assert!(
            Config::new(vec![])
                .with_scale(ScaleSpec::Factor(4.0))
                .validate()
                .is_ok()
        );
    }

    #[test]
    fn default_scale_is_the_xxhdpi_baseline() {
        assert_eq!(ScaleSpec::Default.base_factor(), DEFAULT_SOURCE_SCALE);
        assert_eq!(ScaleSpec::Factor(1.5).base_factor(), 1.5);
    }
}
