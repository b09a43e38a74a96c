//! Error types for Pagina Core

use thiserror::Error;

/// Result type alias using PaginaError
pub type Result<T> = std::result::Result<T, PaginaError>;

/// Top-level error type for all Pagina operations
#[derive(Debug, Error)]
pub enum PaginaError {
    #[error("Pagination error: {0}")]
    Pagination(#[from] PaginationError),

    #[error("Detection error: {0}")]
    Detection(#[from] DetectionError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised when a pagination calculator is constructed with a broken contract
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PaginationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Title list is empty")]
    InvalidTitles,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Two titles share line {line_index}")]
    TitleIndexMismatch { line_index: usize },
}

/// Errors that occur while the break list is being computed.
///
/// These never reach the caller of `calculate`; they are logged and the
/// result degrades to a single page.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalculationError {
    #[error("Break {position} lies outside a document of {total} lines")]
    BreakOutOfRange { position: usize, total: usize },

    #[error("Break list is not strictly increasing at {position}")]
    UnorderedBreaks { position: usize },

    #[error("Break list does not start at line 0")]
    MissingLeadingBreak,
}

/// Errors that occur while a title rule is compiled
#[derive(Debug, Error)]
pub enum DetectionError {
    #[error("Failed to compile title rule '{template}': {source}")]
    RuleCompile {
        template: String,
        #[source]
        source: regex::Error,
    },
}

/// Errors that occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Malformed configuration: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("Failed to read configuration from {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
