//! Source discovery: directory listing and file name parsing.
//!
//! ```text
//! web/_posts/03-02-01-Error-Reporting.md
//!            ── ── ── ───────────────
//!            │  │  │  └ slug
//!            │  │  └ subsection
//!            │  └ section
//!            └ chapter
//! ```

mod name;
mod scan;

pub use name::{NameMatch, SectionName, parse_file_name};
pub use scan::list_sources;

use std::path::PathBuf;

/// A listed `.md` file whose name was parsed successfully.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub name: SectionName,
}

impl SourceFile {
    /// Sort key for numeric ordering.
    pub fn numeric_key(&self) -> (u32, u32, u32, &str) {
        let n = &self.name;
        (n.chapter, n.section, n.subsection, &n.slug)
    }
}
