//! Conversion job definition.

use crate::platform::{OutputTarget, Platform};
use crate::utils::{ConvertError, ConvertResult};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// One unit of work: a single (source file, platform, output target) triple.
///
/// The triple is the job's identity; the expander never schedules the same
/// triple twice. A job is consumed exactly once by a worker and terminates
/// in either a written output file or a captured error.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionJob {
    /// Path to the source image file
    pub source: PathBuf,
    /// Target platform convention
    pub platform: Platform,
    /// Output variant required by that convention
    pub target: OutputTarget,
}

impl ConversionJob {
    /// Computes the output path for this job under the destination root,
    /// following the platform's subdirectory and suffix convention.
    pub fn output_path(&self, dst_root: &Path) -> ConvertResult<PathBuf> {
        let stem = self
            .source
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| {
                ConvertError::format(format!(
                    "Source file has no usable name: {}",
                    self.source.display()
                ))
            })?;
        let ext = self
            .source
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .ok_or_else(|| {
                ConvertError::format(format!(
                    "Source file has no extension: {}",
                    self.source.display()
                ))
            })?;

        let file_name = format!("{}{}.{}", stem, self.target.suffix, ext);
        if self.target.subdir.is_empty() {
            Ok(dst_root.join(file_name))
        } else {
            Ok(dst_root.join(self.target.subdir).join(file_name))
        }
    }

    /// Ratio between the target scale and the factor the source is authored at
    pub fn scale_ratio(&self, base_factor: f32) -> f32 {
        self.target.scale / base_factor
    }

    /// Short human-readable identity used in logs and the finish report
    pub fn describe(&self) -> String {
        format!(
            "{} [{} {}]",
            self.source.display(),
            self.platform,
            self.target.density
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(platform: Platform, index: usize) -> ConversionJob {
        ConversionJob {
            source: PathBuf::from("assets/icon_play.PNG"),
            platform,
            target: platform.scales()[index],
        }
    }

    #[test]
    fn android_outputs_land_in_density_bucket_dirs() {
        let path = job(Platform::Android, 3)
            .output_path(Path::new("/out"))
            .unwrap();
        assert_eq!(
            path,
            PathBuf::from("/out/res/drawable-xxhdpi/icon_play.png")
        );
    }

    #[test]
    fn ios_outputs_carry_scale_suffixes() {
        let path = job(Platform::Ios, 1).output_path(Path::new("/out")).unwrap();
        assert_eq!(path, PathBuf::from("/out/icon_play@2x.png"));

        let base = job(Platform::Ios, 0).output_path(Path::new("/out")).unwrap();
        assert_eq!(base, PathBuf::from("/out/icon_play.png"));
    }

    #[test]
    fn scale_ratio_relates_target_to_source_factor() {
        let job = job(Platform::Android, 0); // mdpi, 1.0
        assert_eq!(job.scale_ratio(3.0), 1.0 / 3.0);
        assert_eq!(job.scale_ratio(1.0), 1.0);
    }
}
