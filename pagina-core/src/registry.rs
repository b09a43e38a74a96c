//! Title registry: the ordered list of chapter titles of a document

use crate::classifier::LineClassifier;
use crate::error::PaginationError;
use crate::types::{ContentChunk, TitleEntry};
use std::collections::HashMap;

/// Title used for the synthetic entry covering front matter
pub const DEFAULT_TITLE_PAGE: &str = "Title Page";

/// Title used for the end-of-book sentinel
pub const END_SENTINEL_TITLE: &str = "The End";

/// Ordered titles spanning a document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TitleRegistry {
    titles: Vec<TitleEntry>,
}

impl TitleRegistry {
    /// Collect the titles tagged by the classifier.
    ///
    /// A synthetic title-page entry is placed on line 0 unless that line is
    /// already a title; complete books get an end sentinel one past the last
    /// line. An empty complete book has no line past the end, so it gets no
    /// sentinel.
    pub fn build(
        classifier: &dyn LineClassifier,
        lines: &[&str],
        chunks: &[ContentChunk],
        book_title: Option<&str>,
        is_complete: bool,
    ) -> Self {
        let mut titles = Vec::new();

        let first_is_title = chunks.first().map(|c| c.is_title()).unwrap_or(false);
        if !first_is_title {
            titles.push(TitleEntry::new(
                book_title.unwrap_or(DEFAULT_TITLE_PAGE),
                0,
            ));
        }

        for chunk in chunks.iter().filter(|c| c.is_title()) {
            let Some(line) = lines.get(chunk.index) else {
                continue;
            };
            let text = classifier
                .title_text(line)
                .unwrap_or_else(|| line.trim().to_string());
            titles.push(TitleEntry::new(text, chunk.index));
        }

        if is_complete && !lines.is_empty() {
            titles.push(TitleEntry::new(END_SENTINEL_TITLE, lines.len()));
        }

        Self { titles }
    }

    pub fn titles(&self) -> &[TitleEntry] {
        &self.titles
    }

    pub fn into_titles(self) -> Vec<TitleEntry> {
        self.titles
    }

    pub fn len(&self) -> usize {
        self.titles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

/// Title of the chapter containing `line` in an ordered title list
pub fn chapter_of(titles: &[TitleEntry], line: usize) -> Option<&TitleEntry> {
    let pos = titles.partition_point(|t| t.line_index <= line);
    pos.checked_sub(1).map(|i| &titles[i])
}

/// Build the lineIndex → position map, rejecting shared lines
pub fn build_title_index(titles: &[TitleEntry]) -> Result<HashMap<usize, usize>, PaginationError> {
    let mut index = HashMap::with_capacity(titles.len());
    for (position, title) in titles.iter().enumerate() {
        if index.insert(title.line_index, position).is_some() {
            return Err(PaginationError::TitleIndexMismatch {
                line_index: title.line_index,
            });
        }
    }
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::RuleClassifier;

    fn lines() -> Vec<&'static str> {
        vec!["My Book", "Chapter 1", "Text.", "Chapter 2", "More text."]
    }

    #[test]
    fn test_build_adds_title_page() {
        let classifier = RuleClassifier::default();
        let lines = lines();
        let chunks = classifier.classify_lines(&lines);
        let registry = TitleRegistry::build(&classifier, &lines, &chunks, Some("My Book"), false);

        let positions: Vec<usize> = registry.titles().iter().map(|t| t.line_index).collect();
        assert_eq!(positions, vec![0, 1, 3]);
        assert_eq!(registry.titles()[0].text, "My Book");
        assert_eq!(registry.titles()[2].text, "Chapter 2");
    }

    #[test]
    fn test_build_complete_book_gets_sentinel() {
        let classifier = RuleClassifier::default();
        let lines = vec!["Chapter 1", "Text.", "Chapter 2", "More."];
        let chunks = classifier.classify_lines(&lines);
        let registry = TitleRegistry::build(&classifier, &lines, &chunks, None, true);

        let positions: Vec<usize> = registry.titles().iter().map(|t| t.line_index).collect();
        assert_eq!(positions, vec![0, 2, 4]);
        assert_eq!(registry.titles()[2].text, END_SENTINEL_TITLE);
    }

    #[test]
    fn test_title_index_rejects_duplicates() {
        let titles = vec![
            TitleEntry::new("A", 0),
            TitleEntry::new("B", 4),
            TitleEntry::new("C", 4),
        ];
        assert_eq!(
            build_title_index(&titles),
            Err(PaginationError::TitleIndexMismatch { line_index: 4 })
        );
    }

    #[test]
    fn test_empty_complete_book_has_no_sentinel() {
        let classifier = RuleClassifier::default();
        let lines: Vec<&str> = Vec::new();
        let registry = TitleRegistry::build(&classifier, &lines, &[], None, true);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.titles()[0].text, DEFAULT_TITLE_PAGE);
        assert!(build_title_index(registry.titles()).is_ok());
    }

    #[test]
    fn test_chapter_of() {
        let titles = vec![
            TitleEntry::new("Front", 0),
            TitleEntry::new("One", 3),
            TitleEntry::new("Two", 9),
        ];
        assert_eq!(chapter_of(&titles, 0).unwrap().text, "Front");
        assert_eq!(chapter_of(&titles, 5).unwrap().text, "One");
        assert_eq!(chapter_of(&titles, 12).unwrap().text, "Two");
        assert!(chapter_of(&[], 3).is_none());
    }
}
