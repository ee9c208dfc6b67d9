//! `<chapter>-<section>-<subsection>-<slug>.md` file name parsing.

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Unanchored, so `draft-01-02-03-x.md` still yields `01-02-03-x`.
static RE_SECTION_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)-([0-9]+)-([0-9]+)-([^.]+)\.md").unwrap());

/// Fields encoded in a section file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionName {
    pub chapter: u32,
    pub section: u32,
    pub subsection: u32,
    pub slug: String,
    /// The matched digits and slug as written, e.g. `01-02-00-Intro`.
    label: String,
}

impl fmt::Display for SectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// Outcome of matching a file name against the naming scheme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NameMatch {
    Matched(SectionName),
    Unmatched(String),
}

/// Parse `file_name` into chapter, section, subsection and slug.
///
/// Numbers too large for `u32` count as a mismatch.
pub fn parse_file_name(file_name: &str) -> NameMatch {
    let unmatched = || NameMatch::Unmatched(file_name.to_string());

    let Some(caps) = RE_SECTION_NAME.captures(file_name) else {
        return unmatched();
    };

    let (Ok(chapter), Ok(section), Ok(subsection)) = (
        caps[1].parse::<u32>(),
        caps[2].parse::<u32>(),
        caps[3].parse::<u32>(),
    ) else {
        return unmatched();
    };

    NameMatch::Matched(SectionName {
        chapter,
        section,
        subsection,
        slug: caps[4].to_string(),
        label: format!("{}-{}-{}-{}", &caps[1], &caps[2], &caps[3], &caps[4]),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matched(file_name: &str) -> SectionName {
        match parse_file_name(file_name) {
            NameMatch::Matched(name) => name,
            NameMatch::Unmatched(name) => panic!("expected {name} to match"),
        }
    }

    #[test]
    fn test_parse_fields() {
        let name = matched("01-02-03-Getting-Started.md");
        assert_eq!(name.chapter, 1);
        assert_eq!(name.section, 2);
        assert_eq!(name.subsection, 3);
        assert_eq!(name.slug, "Getting-Started");
        assert_eq!(name.to_string(), "01-02-03-Getting-Started");
    }

    #[test]
    fn test_parse_multi_digit() {
        let name = matched("12-105-0-Dependency-Injection.md");
        assert_eq!(
            (name.chapter, name.section, name.subsection),
            (12, 105, 0)
        );
    }

    #[test]
    fn test_parse_recovers_numbers_for_many_inputs() {
        for (c, s, sub) in [(0, 0, 0), (1, 1, 1), (7, 42, 9), (99, 1000, 65535)] {
            let file = format!("{c:02}-{s:02}-{sub:02}-Slug_{c}.md");
            let name = matched(&file);
            assert_eq!((name.chapter, name.section, name.subsection), (c, s, sub));
            assert_eq!(name.slug, format!("Slug_{c}"));
        }
    }

    #[test]
    fn test_unanchored_match() {
        let name = matched("draft-03-01-02-Testing.md");
        assert_eq!(name.chapter, 3);
        assert_eq!(name.to_string(), "03-01-02-Testing");
    }

    #[test]
    fn test_unmatched_names() {
        for file in [
            "README.md",
            "01-02-Intro.md",
            "01-02-03-.md",
            "01-02-03-Intro.txt",
            "a-b-c-d.md",
            "01-02-03-Intro.draft.md",
        ] {
            assert_eq!(
                parse_file_name(file),
                NameMatch::Unmatched(file.to_string()),
                "{file} should not match"
            );
        }
    }

    #[test]
    fn test_overflow_is_unmatched() {
        let file = "99999999999-01-01-Huge.md";
        assert_eq!(
            parse_file_name(file),
            NameMatch::Unmatched(file.to_string())
        );
    }
}
