//! Chapter file and manifest output.
//!
//! ```text
//! <output>/
//! ├── Book.txt              # manifest, one line per chapter
//! └── converted/
//!     ├── chapter1.txt
//!     └── chapter2.txt
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::BuildConfig;
use crate::debug;
use crate::pipeline::{BuildError, Chapters};

/// Ordered manifest lines, rendered as `Book.txt`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Manifest {
    entries: Vec<String>,
}

impl Manifest {
    pub fn push(&mut self, entry: String) {
        self.entries.push(entry);
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// One entry per line, each terminated by `\n`.
    pub fn render(&self) -> String {
        self.entries.iter().map(|e| format!("{e}\n")).collect()
    }
}

/// Files produced by a build, in write order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Written {
    pub chapter_files: Vec<PathBuf>,
    pub manifest_file: PathBuf,
    pub manifest: Manifest,
}

/// Write every chapter and then the manifest.
///
/// With `dry_run` set, paths and manifest are computed but nothing touches
/// the disk. The first failed write aborts the run; files already written
/// are left in place.
pub fn write_book(chapters: &Chapters, build: &BuildConfig) -> Result<Written, BuildError> {
    let converted = build.converted_path();
    if !build.dry_run {
        fs::create_dir_all(&converted).map_err(BuildError::fs(&converted))?;
    }

    let mut manifest = Manifest::default();
    let mut chapter_files = Vec::with_capacity(chapters.len());

    for (number, text) in chapters.iter() {
        let path = converted.join(format!("chapter{number}.txt"));
        write_file(&path, text, build.dry_run)?;

        manifest.push(build.manifest_entry(number));
        chapter_files.push(path);
    }

    let manifest_file = build.manifest_path();
    write_file(&manifest_file, &manifest.render(), build.dry_run)?;

    Ok(Written {
        chapter_files,
        manifest_file,
        manifest,
    })
}

fn write_file(path: &Path, content: &str, dry_run: bool) -> Result<(), BuildError> {
    if dry_run {
        debug!("write"; "would write {} ({} bytes)", path.display(), content.len());
        return Ok(());
    }
    fs::write(path, content).map_err(BuildError::fs(path))?;
    debug!("write"; "{} ({} bytes)", path.display(), content.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn build_config(output: &Path) -> BuildConfig {
        BuildConfig {
            output: output.to_path_buf(),
            ..Default::default()
        }
    }

    #[test]
    fn test_manifest_render() {
        let mut manifest = Manifest::default();
        assert_eq!(manifest.render(), "");

        manifest.push("converted/chapter1.txt".into());
        manifest.push("converted/chapter2.txt".into());
        assert_eq!(
            manifest.render(),
            "converted/chapter1.txt\nconverted/chapter2.txt\n"
        );
    }

    #[test]
    fn test_write_chapters_and_manifest() {
        let dir = TempDir::new().unwrap();
        let mut chapters = Chapters::new();
        chapters.push(2, "second");
        chapters.push(1, "first");

        let written = write_book(&chapters, &build_config(dir.path())).unwrap();

        let converted = dir.path().join("converted");
        assert_eq!(
            written.chapter_files,
            vec![converted.join("chapter2.txt"), converted.join("chapter1.txt")]
        );
        assert_eq!(fs::read_to_string(converted.join("chapter2.txt")).unwrap(), "second");
        assert_eq!(fs::read_to_string(converted.join("chapter1.txt")).unwrap(), "first");
        assert_eq!(
            fs::read_to_string(dir.path().join("Book.txt")).unwrap(),
            "converted/chapter2.txt\nconverted/chapter1.txt\n"
        );
        assert_eq!(written.manifest_file, dir.path().join("Book.txt"));
    }

    #[test]
    fn test_no_chapters_writes_empty_manifest() {
        let dir = TempDir::new().unwrap();
        let written = write_book(&Chapters::new(), &build_config(dir.path())).unwrap();

        assert!(written.chapter_files.is_empty());
        assert_eq!(fs::read_to_string(dir.path().join("Book.txt")).unwrap(), "");
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("manuscript");
        let mut chapters = Chapters::new();
        chapters.push(1, "text");

        let build = BuildConfig {
            dry_run: true,
            ..build_config(&output)
        };
        let written = write_book(&chapters, &build).unwrap();

        assert_eq!(written.manifest.entries(), ["converted/chapter1.txt"]);
        assert!(!output.exists());
    }

    #[test]
    fn test_unwritable_output_is_filesystem_error() {
        let dir = TempDir::new().unwrap();
        // a regular file where the output directory should be
        let blocker = dir.path().join("manuscript");
        fs::write(&blocker, "").unwrap();

        let mut chapters = Chapters::new();
        chapters.push(1, "text");

        let err = write_book(&chapters, &build_config(&blocker)).unwrap_err();
        assert!(matches!(err, BuildError::Filesystem { .. }));
    }
}
