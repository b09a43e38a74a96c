//! End-to-end pagination of a plain-text document

use crate::classifier::{LineClassifier, RuleClassifier};
use crate::detector::{RuleSummary, TitlePatternDetector};
use crate::error::Result;
use crate::pagination::{BreakPoints, PaginationCalculator};
use crate::registry::{chapter_of, TitleRegistry};
use crate::types::{PaginationConfig, TitleEntry};
use serde::Serialize;
use std::io::Read;
use std::ops::Range;

/// Settings for a full detect → classify → paginate run
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub config: PaginationConfig,

    /// Infer a title rule from the text before classifying
    pub detect: bool,

    /// Text for the synthetic title-page entry
    pub book_title: Option<String>,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            config: PaginationConfig::default(),
            detect: true,
            book_title: None,
        }
    }
}

impl PipelineOptions {
    pub fn new(config: PaginationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn with_detection(mut self, detect: bool) -> Self {
        self.detect = detect;
        self
    }

    pub fn with_book_title(mut self, title: impl Into<String>) -> Self {
        self.book_title = Some(title.into());
        self
    }
}

/// Entry point for paginating whole documents
pub struct Document;

impl Document {
    /// Paginate a document held in memory
    pub fn paginate(text: &str, options: &PipelineOptions) -> Result<PaginatedDocument> {
        let lines: Vec<&str> = text.lines().collect();

        let classifier = RuleClassifier::default();
        // rules are mined from the same stripped text the classifier matches
        let rule = if options.detect {
            TitlePatternDetector::new().detect(&classifier.strip_lines(&lines))
        } else {
            None
        };
        let summary = rule.as_ref().map(|r| r.summary());

        let classifier = classifier.with_rule(rule);
        let chunks = classifier.classify_lines(&lines);
        let registry = TitleRegistry::build(
            &classifier,
            &lines,
            &chunks,
            options.book_title.as_deref(),
            options.config.is_book_complete,
        );

        let breaks = PaginationCalculator::new(&chunks, registry.titles(), &options.config)?
            .calculate();

        tracing::debug!(
            lines = lines.len(),
            titles = registry.len(),
            pages = breaks.page_count(),
            "Paginated document"
        );

        Ok(PaginatedDocument {
            total_lines: lines.len(),
            titles: registry.into_titles(),
            rule: summary,
            breaks,
        })
    }

    /// Read a UTF-8 document and paginate it
    pub fn paginate_reader(
        reader: &mut dyn Read,
        options: &PipelineOptions,
    ) -> Result<PaginatedDocument> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::paginate(&text, options)
    }
}

/// Result of paginating one document
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedDocument {
    pub total_lines: usize,
    pub titles: Vec<TitleEntry>,
    pub rule: Option<RuleSummary>,
    pub breaks: BreakPoints,
}

impl PaginatedDocument {
    pub fn page_count(&self) -> usize {
        self.breaks.page_count()
    }

    /// Line ranges of every page
    pub fn pages(&self) -> Vec<Range<usize>> {
        self.breaks.pages(self.total_lines)
    }

    /// Page holding `line`
    pub fn page_of(&self, line: usize) -> usize {
        self.breaks.page_of(line)
    }

    /// Chapter title in effect at the start of page `page`
    pub fn page_title(&self, page: usize) -> Option<&TitleEntry> {
        let start = self.breaks.as_slice().get(page).copied()?;
        chapter_of(&self.titles, start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PaginaError, PaginationError};

    const CHAPTERS: [&str; 6] = ["山村", "青牛镇", "入门", "墨大夫", "神手谷", "炼骨崖"];

    /// Six chapters of twelve body lines each
    fn novel() -> String {
        let mut text = String::new();
        for (i, name) in CHAPTERS.iter().enumerate() {
            text.push_str(&format!("第{}章 {}\n", i + 1, name));
            for _ in 0..12 {
                text.push_str("韩立走出了村子，天色渐暗。\n");
            }
        }
        text
    }

    #[test]
    fn test_paginate_detects_and_splits() {
        let options = PipelineOptions::new(PaginationConfig::new().with_lines(4, 12));
        let doc = Document::paginate(&novel(), &options).unwrap();

        let rule = doc.rule.as_ref().expect("rule detected");
        assert_eq!(rule.template, "第{n}章{text}");
        assert_eq!(rule.matched_lines, 6);
        assert_eq!(doc.titles.len(), 6);
        assert_eq!(doc.titles[0].line_index, 0);
        assert_eq!(doc.total_lines, 6 * 13);

        // every chapter holds exactly one page of content
        assert_eq!(doc.breaks, vec![0, 13, 26, 39, 52, 65]);
        assert_eq!(doc.page_of(14), 1);
        assert_eq!(doc.page_title(1).unwrap().text, "第2章 青牛镇");
    }

    #[test]
    fn test_paginate_without_detection_uses_builtin_titles() {
        let options = PipelineOptions::new(PaginationConfig::new().with_lines(4, 12))
            .with_detection(false)
            .with_book_title("凡人修仙传");
        let text = format!("凡人修仙传\n{}", novel());
        let doc = Document::paginate(&text, &options).unwrap();
        assert!(doc.rule.is_none());
        assert_eq!(doc.titles.len(), 7);
        assert_eq!(doc.titles[0].text, "凡人修仙传");
    }

    #[test]
    fn test_empty_text_is_one_page() {
        let options = PipelineOptions::new(PaginationConfig::new().with_lines(2, 10));
        let doc = Document::paginate("", &options).unwrap();
        assert_eq!(doc.breaks, vec![0]);
        assert_eq!(doc.pages(), vec![0..0]);
    }

    #[test]
    fn test_empty_complete_book_is_one_page() {
        let config = PaginationConfig::new()
            .with_lines(2, 10)
            .with_book_complete(true);
        let doc = Document::paginate("", &PipelineOptions::new(config)).unwrap();
        assert_eq!(doc.breaks, vec![0]);
        assert_eq!(doc.titles.len(), 1);
    }

    #[test]
    fn test_markdown_headings_detected_and_classified() {
        let mut text = String::new();
        for (i, name) in CHAPTERS.iter().take(4).enumerate() {
            text.push_str(&format!("## 第{}章 {}\n", i + 1, name));
            for _ in 0..12 {
                text.push_str("韩立走出了村子，天色渐暗。\n");
            }
        }

        let options = PipelineOptions::new(PaginationConfig::new().with_lines(4, 12));
        let doc = Document::paginate(&text, &options).unwrap();

        let rule = doc.rule.as_ref().expect("rule detected");
        assert!(!rule.pattern.contains('#'), "rule kept markup: {}", rule.pattern);
        let title_lines: Vec<usize> = doc.titles.iter().map(|t| t.line_index).collect();
        assert_eq!(title_lines, vec![0, 13, 26, 39]);
        assert_eq!(doc.titles[1].text, "第2章 青牛镇");
        assert_eq!(doc.breaks, vec![0, 13, 26, 39]);
    }

    #[test]
    fn test_missing_limits_is_config_error() {
        let err = Document::paginate("text", &PipelineOptions::default()).unwrap_err();
        assert!(matches!(
            err,
            PaginaError::Pagination(PaginationError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_paginate_reader() {
        let options = PipelineOptions::new(PaginationConfig::new().with_lines(4, 12));
        let text = novel();
        let mut reader = text.as_bytes();
        let doc = Document::paginate_reader(&mut reader, &options).unwrap();
        assert_eq!(doc.page_count(), 6);
    }
}
