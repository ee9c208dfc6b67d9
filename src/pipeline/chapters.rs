//! Chapter accumulation.

use indexmap::IndexMap;

/// Chapter number → concatenated section text, in first-seen order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Chapters {
    chapters: IndexMap<u32, String>,
    sections: usize,
}

impl Chapters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a section to its chapter, creating the chapter on first sight.
    ///
    /// Sections are joined with no separator.
    pub fn push(&mut self, chapter: u32, text: &str) {
        self.chapters.entry(chapter).or_default().push_str(text);
        self.sections += 1;
    }

    /// Chapters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (u32, &str)> {
        self.chapters.iter().map(|(n, text)| (*n, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.chapters.len()
    }

    /// Number of sections pushed so far.
    pub fn section_count(&self) -> usize {
        self.sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_concatenate_without_separator() {
        let mut chapters = Chapters::new();
        chapters.push(1, "Hello ");
        chapters.push(1, "World");

        assert_eq!(chapters.iter().collect::<Vec<_>>(), vec![(1, "Hello World")]);
        assert_eq!(chapters.section_count(), 2);
    }

    #[test]
    fn test_first_seen_order() {
        let mut chapters = Chapters::new();
        chapters.push(3, "c");
        chapters.push(1, "a");
        chapters.push(3, "cc");
        chapters.push(2, "b");

        assert_eq!(chapters.len(), 3);
        assert_eq!(
            chapters.iter().collect::<Vec<_>>(),
            vec![(3, "ccc"), (1, "a"), (2, "b")]
        );
    }

    #[test]
    fn test_empty_section_still_creates_chapter() {
        let mut chapters = Chapters::new();
        assert_eq!(chapters.len(), 0);

        chapters.push(7, "");
        assert_eq!(chapters.iter().collect::<Vec<_>>(), vec![(7, "")]);
        assert_eq!(chapters.section_count(), 1);
    }
}
