//! `[transform]` section configuration.
//!
//! Controls how each section's markdown is rewritten before it is appended
//! to its chapter.
//!
//! # Example
//!
//! ```toml
//! [transform]
//! header = "greedy"           # Leading `---` block: greedy | front-matter | none
//! fence = "~~~~~~~~"          # Fence marker for code blocks
//!
//! [[transform.links]]
//! from = "(/pages/"
//! to = "(http://phptherightway.com/pages/"
//! ```

use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};

/// How a leading `---` metadata block is located.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum HeaderMode {
    /// From the opening `---` through the last `--`/`---` in the file (default).
    #[default]
    Greedy,
    /// From the opening `---` line through the next line that is exactly `---`.
    FrontMatter,
    /// Keep the text as is.
    None,
}

/// Plain-text replacement applied after the fence rewrite.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LinkRewrite {
    pub from: String,
    pub to: String,
}

impl LinkRewrite {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    pub header: HeaderMode,
    /// Line opening and closing a code block in the output.
    pub fence: String,
    /// Link rewrites, applied in order.
    pub links: Vec<LinkRewrite>,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            header: HeaderMode::default(),
            fence: "~~~~~~~~".into(),
            links: vec![LinkRewrite::new(
                "(/pages/",
                "(http://phptherightway.com/pages/",
            )],
        }
    }
}

impl TransformConfig {
    pub const FIELD_FENCE: FieldPath = FieldPath::new("transform.fence");
    pub const FIELD_LINKS: FieldPath = FieldPath::new("transform.links");

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.fence.trim().is_empty() {
            diag.error_with_hint(
                Self::FIELD_FENCE,
                "must not be empty",
                "Markua fences are a run of tildes, e.g. \"~~~~~~~~\"",
            );
        } else if self.fence.contains('\n') {
            diag.error(Self::FIELD_FENCE, "must be a single line");
        }

        for (i, link) in self.links.iter().enumerate() {
            if link.from.is_empty() {
                diag.error(
                    Self::FIELD_LINKS,
                    format!("entry {} has an empty `from`", i + 1),
                );
            }
        }
    }
}
