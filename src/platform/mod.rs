//! Target platform conventions.
//!
//! Each platform carries an ordered table of output targets (density bucket,
//! scale factor, path convention). The job expander consumes these tables to
//! determine fan-out; the image transform consumes them to place output files.

use crate::utils::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A supported target ecosystem with its own density and naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Ios,
}

/// One output variant required by a platform convention.
///
/// `subdir` and `suffix` encode the platform's path convention:
/// Android buckets live in qualified resource directories, iOS variants
/// carry a scale suffix in the file name.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputTarget {
    /// Density bucket or scale qualifier name
    pub density: &'static str,
    /// Resolution multiplier relative to the 1.0 baseline
    pub scale: f32,
    /// Destination subdirectory relative to the destination root
    pub subdir: &'static str,
    /// File name suffix inserted before the extension
    pub suffix: &'static str,
}

const ANDROID_TARGETS: [OutputTarget; 5] = [
    OutputTarget { density: "mdpi", scale: 1.0, subdir: "res/drawable-mdpi", suffix: "" },
    OutputTarget { density: "hdpi", scale: 1.5, subdir: "res/drawable-hdpi", suffix: "" },
    OutputTarget { density: "xhdpi", scale: 2.0, subdir: "res/drawable-xhdpi", suffix: "" },
    OutputTarget { density: "xxhdpi", scale: 3.0, subdir: "res/drawable-xxhdpi", suffix: "" },
    OutputTarget { density: "xxxhdpi", scale: 4.0, subdir: "res/drawable-xxxhdpi", suffix: "" },
];

const IOS_TARGETS: [OutputTarget; 3] = [
    OutputTarget { density: "1x", scale: 1.0, subdir: "", suffix: "" },
    OutputTarget { density: "2x", scale: 2.0, subdir: "", suffix: "@2x" },
    OutputTarget { density: "3x", scale: 3.0, subdir: "", suffix: "@3x" },
];

impl Platform {
    /// Every supported platform, in the order the `all` sentinel expands to.
    pub const ALL: [Platform; 2] = [Platform::Android, Platform::Ios];

    /// Ordered output targets required by this platform's convention
    pub fn scales(&self) -> &'static [OutputTarget] {
        match self {
            Self::Android => &ANDROID_TARGETS,
            Self::Ios => &IOS_TARGETS,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Android => "android",
            Self::Ios => "ios",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Platform selection for a run: a single platform or the `all` sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlatformSet {
    Single(Platform),
    All,
}

impl PlatformSet {
    /// The explicit platform set this selection expands to
    pub fn platforms(&self) -> &[Platform] {
        match self {
            Self::Single(platform) => std::slice::from_ref(platform),
            Self::All => &Platform::ALL,
        }
    }
}

impl FromStr for PlatformSet {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "android" => Ok(Self::Single(Platform::Android)),
            "ios" => Ok(Self::Single(Platform::Ios)),
            "all" => Ok(Self::All),
            other => Err(ValidationError::settings(format!(
                "Unknown platform: {}. Expected android, ios or all",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scale_tables_are_ordered_and_sized_per_convention() {
        assert_eq!(Platform::Android.scales().len(), 5);
        assert_eq!(Platform::Ios.scales().len(), 3);

        let android = Platform::Android.scales();
        assert!(android.windows(2).all(|w| w[0].scale < w[1].scale));
        assert_eq!(android[0].density, "mdpi");
        assert_eq!(android[4].subdir, "res/drawable-xxxhdpi");

        let ios = Platform::Ios.scales();
        assert_eq!(ios[1].suffix, "@2x");
        assert!(ios.iter().all(|t| t.subdir.is_empty()));
    }

    #[test]
    fn all_sentinel_expands_to_every_platform() {
        assert_eq!(PlatformSet::All.platforms(), &Platform::ALL);
        assert_eq!(
            PlatformSet::Single(Platform::Ios).platforms(),
            &[Platform::Ios]
        );
    }

    #[test]
    fn parses_platform_selection() {
        assert_eq!(
            "Android".parse::<PlatformSet>().unwrap(),
            PlatformSet::Single(Platform::Android)
        );
        assert_eq!("all".parse::<PlatformSet>().unwrap(), PlatformSet::All);
        assert!("windows".parse::<PlatformSet>().is_err());
    }
}
