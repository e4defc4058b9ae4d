use crate::utils::{ConvertError, ConvertResult, formats::is_supported_source};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

/// Create the parent directory of a target file if it does not exist yet
pub fn ensure_parent_dir(path: impl AsRef<Path>) -> ConvertResult<()> {
    if let Some(parent) = path.as_ref().parent() {
        fs::create_dir_all(parent).map_err(|e| {
            ConvertError::io(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }
    Ok(())
}

/// Recursively collect supported raster files under a directory.
///
/// The result is sorted so job expansion stays deterministic across runs.
pub fn collect_sources(dir: impl AsRef<Path>) -> ConvertResult<Vec<PathBuf>> {
    let dir = dir.as_ref();
    let mut sources = Vec::new();

    for entry in WalkDir::new(dir) {
        let entry =
            entry.map_err(|e| ConvertError::io(format!("Failed to scan {}: {}", dir.display(), e)))?;
        if entry.file_type().is_file() && is_supported_source(entry.path()) {
            sources.push(entry.into_path());
        }
    }

    sources.sort();
    debug!("Collected {} source images under {}", sources.len(), dir.display());
    Ok(sources)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn collects_only_supported_files_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.png"), b"x").unwrap();
        fs::write(dir.path().join("a.jpg"), b"x").unwrap();
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::create_dir(dir.path().join("nested")).unwrap();
        fs::write(dir.path().join("nested/c.gif"), b"x").unwrap();

        let sources = collect_sources(dir.path()).unwrap();
        assert_eq!(sources.len(), 3);
        assert!(sources[0].ends_with("a.jpg"));
        assert!(sources[1].ends_with("b.png"));
        assert!(sources[2].ends_with("nested/c.gif"));
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let err = collect_sources("/nonexistent/source/dir").unwrap_err();
        assert!(matches!(err, ConvertError::IO(_)));
    }
}
