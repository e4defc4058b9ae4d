pub mod error;
pub mod formats;
pub mod fs;

pub use error::{ConvertError, ConvertResult, PathError, ValidationError};
pub use formats::{ImageFormat, format_from_extension, is_supported_source};
pub use fs::{collect_sources, ensure_parent_dir};
