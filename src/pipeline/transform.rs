//! Section content rewriting.
//!
//! Each section goes through three steps, in this order:
//!
//! | Step          | Input                         | Output                          |
//! |---------------|-------------------------------|---------------------------------|
//! | header strip  | `---\ntitle: x\n---\n` prefix | removed                         |
//! | fence rewrite | `{% highlight php %}`         | `\n{lang="php"}\n~~~~~~~~`      |
//! | literals      | `{% endhighlight %}`          | `~~~~~~~~`                      |
//! |               | `(/pages/`                    | `(http://phptherightway.com/pages/` |
//!
//! The header is stripped first so nothing inside it is rewritten.

use regex::{Captures, Regex};
use std::sync::LazyLock;

use crate::config::{HeaderMode, TransformConfig};

/// From a leading `---` through the last `--` (plus an optional third dash).
static RE_GREEDY_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\A---[\s\S]*---?").unwrap());

static RE_HIGHLIGHT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{% highlight (\S+) %\}").unwrap());

const END_HIGHLIGHT: &str = "{% endhighlight %}";

/// Rewrites raw section markdown into manuscript text.
pub struct Transformer<'a> {
    config: &'a TransformConfig,
}

impl<'a> Transformer<'a> {
    pub fn new(config: &'a TransformConfig) -> Self {
        Self { config }
    }

    /// Apply header strip, fence rewrite and literal substitutions.
    pub fn apply(&self, raw: &str) -> String {
        let body = strip_header(raw, self.config.header);
        let fence = self.config.fence.as_str();

        let text = RE_HIGHLIGHT.replace_all(body, |caps: &Captures| {
            format!("\n{{lang=\"{}\"}}\n{fence}", &caps[1])
        });

        let mut text = text.replace(END_HIGHLIGHT, fence);
        for link in &self.config.links {
            if !link.from.is_empty() {
                text = text.replace(&link.from, &link.to);
            }
        }
        text
    }
}

/// Remove a leading `---` metadata block according to `mode`.
///
/// Text that doesn't start with `---` is returned unchanged.
pub fn strip_header(text: &str, mode: HeaderMode) -> &str {
    match mode {
        HeaderMode::None => text,
        HeaderMode::Greedy => match RE_GREEDY_HEADER.find(text) {
            Some(m) => strip_line_break(&text[m.end()..]),
            None => text,
        },
        HeaderMode::FrontMatter => match front_matter_end(text) {
            Some(end) => &text[end..],
            None => text,
        },
    }
}

/// Drop one `\n` or `\r\n` left behind by the closing delimiter.
fn strip_line_break(text: &str) -> &str {
    text.strip_prefix("\r\n")
        .or_else(|| text.strip_prefix('\n'))
        .unwrap_or(text)
}

/// Byte offset just past the closing `---` line, line break included.
///
/// The opening line must be `---` alone and the block must be closed.
fn front_matter_end(text: &str) -> Option<usize> {
    let rest = text.strip_prefix("---")?;
    let first_break = rest.find('\n')?;
    if !rest[..first_break].trim().is_empty() {
        return None;
    }

    let mut offset = 3 + first_break + 1;
    for line in text[offset..].split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == "---" {
            return Some(offset + line.len());
        }
        offset += line.len();
    }
    None
}
