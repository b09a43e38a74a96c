//! Classified line type consumed by the pagination calculator

use serde::{Deserialize, Serialize};

/// What kind of element a physical line holds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    /// A chapter title; never counted as content
    Title,
    /// A non-title heading (section marker, emphasised line)
    Heading,
    /// Ordinary body text
    Paragraph,
    /// Blank or punctuation-only line
    Empty,
}

/// One classified physical line of a document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContentChunk {
    /// Position of the line in the document (0-based)
    pub index: usize,

    /// Element kind assigned by the classifier
    pub element_type: ElementType,

    /// Visible characters after markup stripping
    pub char_count: usize,

    /// Human-facing line number (1-based)
    pub line_number: usize,
}

impl ContentChunk {
    /// Create a chunk for the line at `index`
    pub fn new(index: usize, element_type: ElementType, char_count: usize) -> Self {
        Self {
            index,
            element_type,
            char_count,
            line_number: index + 1,
        }
    }

    /// Shorthand for a title line
    pub fn title(index: usize, char_count: usize) -> Self {
        Self::new(index, ElementType::Title, char_count)
    }

    /// Shorthand for a paragraph line
    pub fn paragraph(index: usize, char_count: usize) -> Self {
        Self::new(index, ElementType::Paragraph, char_count)
    }

    /// Shorthand for an empty line
    pub fn empty(index: usize) -> Self {
        Self::new(index, ElementType::Empty, 0)
    }

    pub fn is_title(&self) -> bool {
        self.element_type == ElementType::Title
    }

    /// Whether the line contributes to a page's content length
    pub fn is_content(&self) -> bool {
        !matches!(self.element_type, ElementType::Title | ElementType::Empty) && self.char_count > 0
    }

    /// Whether the line is visible at all (titles included)
    pub fn is_non_empty(&self) -> bool {
        self.element_type != ElementType::Empty && self.char_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_excludes_titles_and_empties() {
        assert!(ContentChunk::paragraph(0, 12).is_content());
        assert!(!ContentChunk::title(1, 5).is_content());
        assert!(!ContentChunk::empty(2).is_content());
        assert!(!ContentChunk::paragraph(3, 0).is_content());
        assert!(ContentChunk::title(1, 5).is_non_empty());
    }

    #[test]
    fn test_chunk_serialization() {
        let chunk = ContentChunk::new(4, ElementType::Heading, 7);
        let json = serde_json::to_string(&chunk).unwrap();
        assert_eq!(
            json,
            r#"{"index":4,"elementType":"heading","charCount":7,"lineNumber":5}"#
        );
    }
}
