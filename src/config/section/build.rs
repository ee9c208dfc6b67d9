//! `[build]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [build]
//! source = "web/_posts"         # Directory of numbered .md sections (relative to root)
//! output = "manuscript"         # Output root for chapters and manifest (relative to root)
//! converted_dir = "converted"   # Chapter file subdirectory inside output
//! manifest = "Book.txt"         # Manifest file name inside output
//! order = "listing"             # Chapter ordering: listing | numeric
//! on_mismatch = "skip"          # Unparseable file names: skip | abort
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Component, Path, PathBuf};

/// Order in which chapters (and the sections inside them) are emitted.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ChapterOrder {
    /// First-seen order over the sorted directory listing (default).
    #[default]
    Listing,
    /// Sort by chapter, section, subsection, then slug.
    Numeric,
}

/// What to do with a `.md` file whose name has no chapter/section numbers.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MismatchPolicy {
    /// Log a warning and leave the file out (default).
    #[default]
    Skip,
    /// Stop the run with a parse error.
    Abort,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Directory scanned for section files.
    pub source: PathBuf,
    /// Root directory for generated files.
    pub output: PathBuf,
    /// Subdirectory of `output` holding `chapter<N>.txt` files.
    pub converted_dir: String,
    /// Manifest file name, written directly under `output`.
    pub manifest: String,
    pub order: ChapterOrder,
    pub on_mismatch: MismatchPolicy,

    /// Run every stage except the final writes (CLI only).
    #[serde(skip)]
    pub dry_run: bool,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            source: "web/_posts".into(),
            output: "manuscript".into(),
            converted_dir: "converted".into(),
            manifest: "Book.txt".into(),
            order: ChapterOrder::default(),
            on_mismatch: MismatchPolicy::default(),
            dry_run: false,
        }
    }
}

impl BuildConfig {
    pub const FIELD_CONVERTED_DIR: FieldPath = FieldPath::new("build.converted_dir");
    pub const FIELD_MANIFEST: FieldPath = FieldPath::new("build.manifest");

    /// Directory receiving the chapter files.
    pub fn converted_path(&self) -> PathBuf {
        self.output.join(&self.converted_dir)
    }

    /// Full path of the manifest file.
    pub fn manifest_path(&self) -> PathBuf {
        self.output.join(&self.manifest)
    }

    /// Manifest entry for a chapter, always `/`-separated.
    pub fn manifest_entry(&self, chapter: u32) -> String {
        format!(
            "{}/chapter{chapter}.txt",
            self.converted_dir.trim_end_matches('/')
        )
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if let Some(message) = check_relative(&self.converted_dir) {
            diag.error_with_hint(
                Self::FIELD_CONVERTED_DIR,
                message,
                "use a directory name such as \"converted\"",
            );
        }
        if let Some(message) = check_relative(&self.manifest) {
            diag.error_with_hint(
                Self::FIELD_MANIFEST,
                message,
                "use a file name such as \"Book.txt\"",
            );
        }
    }
}

/// Output-relative names must stay inside the output directory.
fn check_relative(value: &str) -> Option<&'static str> {
    if value.trim().is_empty() {
        return Some("must not be empty");
    }
    let path = Path::new(value);
    if path.is_absolute() || value.starts_with('/') {
        return Some("must be a path relative to the output directory");
    }
    if path
        .components()
        .any(|c| matches!(c, Component::ParentDir | Component::Prefix(_)))
    {
        return Some("must not leave the output directory");
    }
    None
}
