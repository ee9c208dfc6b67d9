//! Manuscript building.
//!
//! Build phases:
//! - **Collect** - List `.md` sources and parse their names
//! - **Transform** - Strip headers, rewrite fences and links
//! - **Aggregate** - Group sections by chapter
//! - **Write** - Chapter files, then the `Book.txt` manifest

use anyhow::{Context, Result};

use crate::{
    config::BookConfig,
    debug, log,
    pipeline::{self, BuildReport},
    utils::plural_count,
};

/// Convert the configured source directory into chapter files and manifest.
pub fn build_book(config: &BookConfig) -> Result<BuildReport> {
    let source = config.root_relative(&config.build.source);
    log!("build"; "converting {}", source.display());

    let report = pipeline::run(config)
        .with_context(|| format!("failed to build manuscript from {}", source.display()))?;

    log_summary(config, &report);
    Ok(report)
}

fn log_summary(config: &BookConfig, report: &BuildReport) {
    let output = config.root_relative(&config.build.output);
    let verb = if config.build.dry_run {
        "would write"
    } else {
        "wrote"
    };

    let written = &report.written;
    for path in &written.chapter_files {
        debug!("build"; "chapter {}", config.root_relative(path).display());
    }
    debug!(
        "build";
        "manifest {} lists {}",
        config.root_relative(&written.manifest_file).display(),
        plural_count(written.manifest.entries().len(), "chapter")
    );

    log!(
        "build";
        "{} {} ({}) to {}",
        verb,
        plural_count(report.chapters, "chapter"),
        plural_count(report.sections, "section"),
        output.display()
    );

    if !report.skipped.is_empty() {
        log!(
            "warning";
            "{} skipped",
            plural_count(report.skipped.len(), "file")
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_book_reports_counts() {
        let dir = TempDir::new().unwrap();
        let mut config = BookConfig::default();
        config.root = dir.path().to_path_buf();
        config.build.source = dir.path().join("web/_posts");
        config.build.output = dir.path().join("manuscript");
        fs::create_dir_all(&config.build.source).unwrap();
        fs::write(config.build.source.join("01-01-01-A.md"), "a").unwrap();
        fs::write(config.build.source.join("02-01-01-B.md"), "b").unwrap();
        fs::write(config.build.source.join("index.md"), "skipped").unwrap();

        let report = build_book(&config).unwrap();
        assert_eq!(report.chapters, 2);
        assert_eq!(report.sections, 2);
        assert_eq!(report.skipped, vec!["index.md".to_string()]);
        assert!(dir.path().join("manuscript/Book.txt").exists());
    }

    #[test]
    fn test_build_book_error_has_context() {
        let dir = TempDir::new().unwrap();
        let mut config = BookConfig::default();
        config.root = dir.path().to_path_buf();
        config.build.source = dir.path().join("missing");

        let err = build_book(&config).unwrap_err();
        assert!(err.to_string().contains("failed to build manuscript from missing"));
        assert!(err.downcast_ref::<pipeline::BuildError>().is_some());
    }
}
