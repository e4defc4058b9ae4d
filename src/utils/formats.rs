use crate::utils::ConvertError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

/// Raster formats the converter accepts as source input.
///
/// Output files keep the source format, so every listed format must be
/// both decodable and encodable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    JPEG,
    PNG,
    GIF,
    WebP,
    BMP,
    TIFF,
}

impl FromStr for ImageFormat {
    type Err = ConvertError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        let ext = ext.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Ok(Self::JPEG),
            "png" => Ok(Self::PNG),
            "gif" => Ok(Self::GIF),
            "webp" => Ok(Self::WebP),
            "bmp" => Ok(Self::BMP),
            "tif" | "tiff" => Ok(Self::TIFF),
            _ => Err(ConvertError::format(format!(
                "Unsupported image format: {}",
                ext
            ))),
        }
    }
}

/// Get format from file extension
pub fn format_from_extension(path: impl AsRef<Path>) -> Result<ImageFormat, ConvertError> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| ConvertError::format(format!("File has no extension: {}", path.display())))?;

    ImageFormat::from_str(ext)
}

/// Check whether a path carries a supported raster extension
pub fn is_supported_source(path: impl AsRef<Path>) -> bool {
    format_from_extension(path).is_ok()
}
