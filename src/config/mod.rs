//! Book configuration management for `manuscript.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── build      # [build]
//! │   └── transform  # [transform]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # BookConfig (this file)
//! ```
//!
//! The config file is optional. Without one, defaults apply and the
//! current directory is the project root.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{
    BuildConfig, ChapterOrder, HeaderMode, LinkRewrite, MismatchPolicy, TransformConfig,
};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::{
    cli::{BuildArgs, Cli, Commands},
    debug, log,
    utils::path::normalize_path,
};
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file name looked up when `-C` is not given.
pub const DEFAULT_CONFIG_NAME: &str = "manuscript.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing manuscript.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookConfig {
    /// Absolute path to the config file, empty when none was found (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Project root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Source, output and ordering settings
    #[serde(default)]
    pub build: BuildConfig,

    /// Content rewriting settings
    #[serde(default)]
    pub transform: TransformConfig,
}

impl BookConfig {
    /// Load configuration from CLI arguments.
    ///
    /// Searches upward from cwd to find the config file. The project root
    /// is the config file's parent directory, or cwd when there is none.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::load_from(cli, &cwd)
    }

    /// Same as [`BookConfig::load`] with an explicit starting directory.
    pub fn load_from(cli: &Cli, cwd: &Path) -> Result<Self> {
        let (mut config, root) = match find_config_file(&cli.config, cwd) {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                let root = path
                    .parent()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| cwd.to_path_buf());
                config.config_path = normalize_path(&path);
                (config, root)
            }
            None if cli.config.as_path() != Path::new(DEFAULT_CONFIG_NAME) => {
                bail!(ConfigError::Validation(format!(
                    "config file `{}` not found",
                    cli.config.display()
                )));
            }
            None => (Self::default(), cwd.to_path_buf()),
        };

        config.finalize(cli, &root);
        config.validate()?;

        if config.config_path.as_os_str().is_empty() {
            debug!("config"; "no {} found, using defaults", cli.config.display());
        } else {
            debug!("config"; "loaded {}", config.config_path.display());
        }
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            log!("warning"; "{}", unknown_fields_warning(&ignored, path));
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })
        .map_err(ConfigError::Toml)?;
        Ok((config, ignored))
    }

    /// Get path relative to the project root, for display.
    pub fn root_relative(&self, path: impl AsRef<Path>) -> PathBuf {
        path.as_ref()
            .strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.as_ref().to_path_buf())
    }

    // ========================================================================
    // cli configuration updates
    // ========================================================================

    /// Resolve paths and apply CLI overrides.
    fn finalize(&mut self, cli: &Cli, root: &Path) {
        Self::update_option(&mut self.build.source, cli.source.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        self.normalize_paths(root);
        self.apply_command_options(cli);
    }

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli) {
        match &cli.command {
            Commands::Build { build_args } => self.apply_build_args(build_args),
            Commands::Check { verbose } => crate::logger::set_verbose(*verbose),
        }
    }

    /// Apply build arguments from CLI.
    fn apply_build_args(&mut self, args: &BuildArgs) {
        crate::logger::set_verbose(args.verbose);

        Self::update_option(&mut self.build.order, args.order.as_ref());
        Self::update_option(&mut self.build.on_mismatch, args.on_mismatch.as_ref());
        self.build.dry_run = args.dry_run;
    }

    /// Update config option if CLI value is provided.
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    // ========================================================================
    // path normalization
    // ========================================================================

    /// Normalize source and output relative to the root directory.
    fn normalize_paths(&mut self, root: &Path) {
        let root = normalize_path(root);
        self.build.source = normalize_path(&root.join(&self.build.source));
        self.build.output = normalize_path(&root.join(&self.build.output));
        self.root = root;
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate configuration.
    ///
    /// Collects all validation errors and returns them at once.
    pub fn validate(&self) -> Result<()> {
        let mut diag = ConfigDiagnostics::new();

        self.build.validate(&mut diag);
        self.transform.validate(&mut diag);

        diag.into_result()
            .map_err(|e| ConfigError::Diagnostics(e).into())
    }
}

/// Warning listing unknown fields, one per line.
fn unknown_fields_warning(fields: &[String], path: &Path) -> String {
    let display_path = path
        .file_name()
        .map(|n| n.to_string_lossy())
        .unwrap_or_else(|| path.to_string_lossy());

    let mut message = format!("unknown fields in {display_path}, ignoring:");
    for field in fields {
        message.push_str("\n- ");
        message.push_str(field);
    }
    message
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_*`)
// ============================================================================

/// Parse config, panicking on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(content: &str) -> BookConfig {
    let (parsed, ignored) = BookConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn parse_cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("manuscript").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_load_without_config_file_uses_cwd() {
        let dir = TempDir::new().unwrap();
        let cli = parse_cli(&["-C", DEFAULT_CONFIG_NAME, "build"]);

        let config = BookConfig::load_from(&cli, dir.path()).unwrap();
        let root = normalize_path(dir.path());
        assert_eq!(config.root, root);
        assert_eq!(config.build.source, root.join("web/_posts"));
        assert_eq!(config.build.output, root.join("manuscript"));
        assert!(config.config_path.as_os_str().is_empty());
    }

    #[test]
    fn test_load_explicit_missing_config_fails() {
        let dir = TempDir::new().unwrap();
        let cli = parse_cli(&["-C", "other.toml", "build"]);

        let err = BookConfig::load_from(&cli, dir.path()).unwrap_err();
        assert!(err.to_string().contains("other.toml"));
    }

    #[test]
    fn test_load_resolves_relative_to_config_dir() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("web");
        fs::create_dir_all(&nested).unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            "[build]\nsource = \"posts\"\noutput = \"out\"\norder = \"numeric\"\n",
        )
        .unwrap();

        let cli = parse_cli(&["build"]);
        let config = BookConfig::load_from(&cli, &nested).unwrap();
        let root = normalize_path(dir.path());
        assert_eq!(config.build.source, root.join("posts"));
        assert_eq!(config.build.output, root.join("out"));
        assert_eq!(config.build.order, ChapterOrder::Numeric);
        assert_eq!(config.root_relative(&config.build.output), PathBuf::from("out"));
    }

    #[test]
    fn test_cli_overrides_config() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            "[build]\norder = \"numeric\"\non_mismatch = \"skip\"\n",
        )
        .unwrap();

        let cli = parse_cli(&[
            "-o",
            "elsewhere",
            "build",
            "--dry-run",
            "--order",
            "listing",
            "--on-mismatch",
            "abort",
        ]);
        let config = BookConfig::load_from(&cli, dir.path()).unwrap();
        assert_eq!(config.build.output, normalize_path(dir.path()).join("elsewhere"));
        assert_eq!(config.build.order, ChapterOrder::Listing);
        assert_eq!(config.build.on_mismatch, MismatchPolicy::Abort);
        assert!(config.build.dry_run);
    }

    #[test]
    fn test_invalid_config_reports_diagnostics() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            "[build]\nmanifest = \"\"\n[transform]\nfence = \"\"\n",
        )
        .unwrap();

        let cli = parse_cli(&["build"]);
        let err = BookConfig::load_from(&cli, dir.path()).unwrap_err();
        let Some(ConfigError::Diagnostics(diag)) = err.downcast_ref::<ConfigError>() else {
            panic!("expected diagnostics, got {err:?}");
        };
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn test_unknown_fields_are_collected() {
        let (config, mut ignored) =
            BookConfig::parse_with_ignored("[build]\nsorce = \"x\"\n[extra]\nkey = 1\n").unwrap();
        ignored.sort();
        assert_eq!(config.build.source, PathBuf::from("web/_posts"));
        assert_eq!(ignored, vec!["build.sorce".to_string(), "extra".to_string()]);
    }

    #[test]
    fn test_unknown_fields_warning_is_one_message() {
        let fields = vec!["build.sorce".to_string(), "extra".to_string()];
        let message = unknown_fields_warning(&fields, Path::new("/book/manuscript.toml"));
        assert_eq!(
            message,
            "unknown fields in manuscript.toml, ignoring:\n- build.sorce\n- extra"
        );
    }

    #[test]
    fn test_malformed_toml_is_error() {
        let err = BookConfig::parse_with_ignored("[build\n").unwrap_err();
        assert!(err.downcast_ref::<ConfigError>().is_some());
    }
}
