//! Incremental write guard
//!
//! Generated files are only rewritten when their content changes, so build
//! systems that watch modification times do not rebuild needlessly. Writes go
//! through a temporary file in the destination directory and are renamed
//! into place.

use anyhow::{Context, Result};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Unchanged,
    Written,
}

pub fn write_if_changed(path: &Path, contents: &str) -> Result<WriteOutcome> {
    // An unreadable existing file counts as absent
    if let Ok(current) = fs::read(path) {
        if current == contents.as_bytes() {
            debug!(path = %path.display(), "output unchanged, skipping write");
            return Ok(WriteOutcome::Unchanged);
        }
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory: {}", parent.display()))?;

    let mut file = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
    file.write_all(contents.as_bytes())
        .with_context(|| format!("Failed to write {}", path.display()))?;
    // Temporary files are private; the artifact keeps the previous file's mode
    if let Some(permissions) = target_permissions(path) {
        file.as_file()
            .set_permissions(permissions)
            .with_context(|| format!("Failed to set permissions for {}", path.display()))?;
    }
    file.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to replace {}", path.display()))?;

    info!(path = %path.display(), bytes = contents.len(), "wrote generated file");
    Ok(WriteOutcome::Written)
}

/// Permissions for the new artifact: the existing file's, or 0644 for a new one
#[cfg(unix)]
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    use std::os::unix::fs::PermissionsExt;

    Some(
        fs::metadata(path)
            .map(|metadata| metadata.permissions())
            .unwrap_or_else(|_| fs::Permissions::from_mode(0o644)),
    )
}

#[cfg(not(unix))]
fn target_permissions(path: &Path) -> Option<fs::Permissions> {
    fs::metadata(path).ok().map(|metadata| metadata.permissions())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_write_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("R.generated.swift");

        assert_eq!(write_if_changed(&path, "struct R {}\n").unwrap(), WriteOutcome::Written);
        assert_eq!(write_if_changed(&path, "struct R {}\n").unwrap(), WriteOutcome::Unchanged);
        assert_eq!(
            write_if_changed(&path, "public struct R {}\n").unwrap(),
            WriteOutcome::Written
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "public struct R {}\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_rewrite_keeps_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("R.generated.swift");

        write_if_changed(&path, "struct R {}\n").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);

        fs::set_permissions(&path, fs::Permissions::from_mode(0o664)).unwrap();
        write_if_changed(&path, "public struct R {}\n").unwrap();
        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o664);
    }
}
