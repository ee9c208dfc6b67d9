//! Source directory listing.

use std::fs;
use std::path::{Path, PathBuf};

use crate::debug;
use crate::pipeline::BuildError;

/// List the `.md` files directly inside `dir`, sorted by file name.
///
/// Directory iteration order differs between platforms and filesystems,
/// so entries are sorted by name to keep runs reproducible. The sort is
/// lexical: `01-10-…` comes before `01-2-…`.
///
/// Subdirectories and files with any other extension are skipped.
pub fn list_sources(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let entries = fs::read_dir(dir).map_err(BuildError::fs(dir))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(BuildError::fs(dir))?;
        let path = entry.path();

        // follows symlinks, so linked section files are kept
        if !path.is_file() {
            debug!("scan"; "skipping directory {}", path.display());
            continue;
        }
        if path.extension().is_none_or(|ext| ext != "md") {
            debug!("scan"; "skipping {}", path.display());
            continue;
        }

        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}
