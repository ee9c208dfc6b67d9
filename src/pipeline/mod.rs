//! Conversion pipeline.
//!
//! ```text
//! list_sources ─▶ parse_file_name ─▶ Transformer ─▶ Chapters ─▶ write_book
//!   (.md only)      (NameMatch)      (rewrites)    (by chapter)  (files + Book.txt)
//! ```
//!
//! Data only flows forward. Everything is read, transformed and grouped in
//! memory before the first write.

mod chapters;
mod error;
pub mod transform;
pub mod write;

pub use chapters::Chapters;
pub use error::BuildError;
pub use transform::Transformer;
pub use write::{Written, write_book};

use std::fs;

use crate::config::{BookConfig, BuildConfig, ChapterOrder, MismatchPolicy};
use crate::log;
use crate::source::{NameMatch, SourceFile, list_sources, parse_file_name};

/// Sources selected for a build, plus the names that were left out.
#[derive(Debug, Default)]
pub struct Collected {
    pub files: Vec<SourceFile>,
    pub skipped: Vec<String>,
}

/// Summary of a finished build.
#[derive(Debug)]
pub struct BuildReport {
    pub chapters: usize,
    pub sections: usize,
    pub skipped: Vec<String>,
    pub written: Written,
}

/// Run the whole conversion described by `config`.
pub fn run(config: &BookConfig) -> Result<BuildReport, BuildError> {
    let collected = collect_sources(&config.build)?;
    let transformer = Transformer::new(&config.transform);
    let chapters = aggregate(&collected.files, &transformer)?;
    let written = write_book(&chapters, &config.build)?;

    Ok(BuildReport {
        chapters: chapters.len(),
        sections: chapters.section_count(),
        skipped: collected.skipped,
        written,
    })
}

/// List and parse the source directory, applying the mismatch policy and
/// the configured order.
pub fn collect_sources(build: &BuildConfig) -> Result<Collected, BuildError> {
    let mut collected = Collected::default();

    for path in list_sources(&build.source)? {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        match parse_file_name(&file_name) {
            NameMatch::Matched(name) => collected.files.push(SourceFile { path, name }),
            NameMatch::Unmatched(file) => match build.on_mismatch {
                MismatchPolicy::Skip => {
                    log!(
                        "warning";
                        "skipping {}: expected <chapter>-<section>-<subsection>-<slug>.md",
                        file
                    );
                    collected.skipped.push(file);
                }
                MismatchPolicy::Abort => return Err(BuildError::Parse { file }),
            },
        }
    }

    if build.order == ChapterOrder::Numeric {
        collected.files.sort_by(|a, b| a.numeric_key().cmp(&b.numeric_key()));
    }

    Ok(collected)
}

/// Read, transform and group every source by chapter.
pub fn aggregate(files: &[SourceFile], transformer: &Transformer) -> Result<Chapters, BuildError> {
    let mut chapters = Chapters::new();

    for file in files {
        log!("read"; "{}", file.name);
        let raw = fs::read_to_string(&file.path).map_err(BuildError::fs(&file.path))?;
        chapters.push(file.name.chapter, &transformer.apply(&raw));
    }

    Ok(chapters)
}
