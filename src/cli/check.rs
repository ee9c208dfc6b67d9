//! Source naming check.
//!
//! Lists every `.md` file in the source directory with the chapter,
//! section and subsection parsed from its name. Nothing is written.

use anyhow::{Context, Result, bail};

use crate::{
    config::{BookConfig, ChapterOrder},
    log,
    source::{NameMatch, SourceFile, list_sources, parse_file_name},
    utils::plural_count,
};

/// Result of scanning the source directory.
#[derive(Debug, Default)]
pub struct CheckReport {
    pub files: Vec<SourceFile>,
    pub mismatched: Vec<String>,
}

impl CheckReport {
    /// Distinct chapter numbers in report order.
    pub fn chapters(&self) -> Vec<u32> {
        let mut seen = Vec::new();
        for file in &self.files {
            if !seen.contains(&file.name.chapter) {
                seen.push(file.name.chapter);
            }
        }
        seen
    }
}

/// Scan sources and classify every file name.
pub fn scan(config: &BookConfig) -> Result<CheckReport> {
    let source = &config.build.source;
    let paths = list_sources(source)
        .with_context(|| format!("failed to list {}", config.root_relative(source).display()))?;

    let mut report = CheckReport::default();
    for path in paths {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match parse_file_name(&file_name) {
            NameMatch::Matched(name) => report.files.push(SourceFile { path, name }),
            NameMatch::Unmatched(file) => report.mismatched.push(file),
        }
    }

    if config.build.order == ChapterOrder::Numeric {
        report.files.sort_by(|a, b| a.numeric_key().cmp(&b.numeric_key()));
    }
    Ok(report)
}

/// Print the scan and fail if any file breaks the naming scheme.
pub fn check_sources(config: &BookConfig) -> Result<()> {
    let report = scan(config)?;

    for file in &report.files {
        let name = &file.name;
        log!(
            "check";
            "{} → chapter {}, section {}, subsection {}",
            name,
            name.chapter,
            name.section,
            name.subsection
        );
    }
    for file in &report.mismatched {
        log!("warning"; "{} does not match <chapter>-<section>-<subsection>-<slug>.md", file);
    }

    log!(
        "check";
        "{} in {}",
        plural_count(report.files.len(), "section"),
        plural_count(report.chapters().len(), "chapter")
    );

    if !report.mismatched.is_empty() {
        bail!(
            "found {} with unexpected names",
            plural_count(report.mismatched.len(), "file")
        );
    }
    Ok(())
}
