//! Pagina Core Library
//!
//! Chapter detection and pagination for plain-text books. Raw lines are
//! mined for a recurring title format, classified into [`ContentChunk`]s, and
//! split into pages that respect size limits while keeping chapter
//! boundaries on page boundaries wherever the limits allow.

pub mod classifier;
pub mod detector;
pub mod document;
pub mod error;
pub mod pagination;
pub mod registry;
pub mod types;

pub use classifier::{LineClassifier, RuleClassifier};
pub use detector::{CompiledTitleRule, NumberType, RuleSummary, TitlePatternDetector};
pub use document::{Document, PaginatedDocument, PipelineOptions};
pub use error::{
    CalculationError, ConfigError, DetectionError, PaginaError, PaginationError, Result,
};
pub use pagination::{BreakPoints, PaginationCalculator, SortedPageBreaks};
pub use registry::TitleRegistry;
pub use types::{ContentChunk, CountingMode, ElementType, PaginationConfig, TitleEntry};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_creation() {
        let config = PaginationConfig::new().with_lines(2, 10);
        assert_eq!(config.max_lines, Some(10));
        assert_eq!(config.counting_mode(), CountingMode::Lines);
    }
}
