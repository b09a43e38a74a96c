//! Pagination configuration

use crate::error::{ConfigError, PaginationError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default factor applied to character limits for non-Eastern languages
pub const DEFAULT_CHAR_MULTIPLIER: f64 = 3.0;

fn default_char_multiplier() -> f64 {
    DEFAULT_CHAR_MULTIPLIER
}

fn default_true() -> bool {
    true
}

/// Unit in which page sizes are measured
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CountingMode {
    /// Non-empty content lines
    Lines,
    /// Visible characters
    Chars,
}

/// Size limits and layout flags supplied by the host application
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationConfig {
    #[serde(default)]
    pub max_lines: Option<usize>,

    #[serde(default)]
    pub min_lines: Option<usize>,

    #[serde(default)]
    pub max_chars: Option<usize>,

    #[serde(default)]
    pub min_chars: Option<usize>,

    /// `None` means "auto": count characters for Eastern languages
    #[serde(default)]
    pub use_char_count: Option<bool>,

    /// Scale for character limits in non-Eastern languages
    #[serde(default = "default_char_multiplier")]
    pub char_multiplier: f64,

    /// Align page boundaries with chapter titles
    #[serde(default = "default_true")]
    pub page_break_on_title: bool,

    #[serde(default)]
    pub is_eastern_language: bool,

    /// The last title entry is an end-of-book sentinel
    #[serde(default)]
    pub is_book_complete: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_lines: None,
            min_lines: None,
            max_chars: None,
            min_chars: None,
            use_char_count: None,
            char_multiplier: DEFAULT_CHAR_MULTIPLIER,
            page_break_on_title: true,
            is_eastern_language: false,
            is_book_complete: false,
        }
    }
}

/// Limits after counting mode and language scaling have been applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedLimits {
    pub mode: CountingMode,
    pub min: usize,
    pub max: usize,
}

impl PaginationConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the line limits
    pub fn with_lines(mut self, min: usize, max: usize) -> Self {
        self.min_lines = Some(min);
        self.max_lines = Some(max);
        self
    }

    /// Set the character limits
    pub fn with_chars(mut self, min: usize, max: usize) -> Self {
        self.min_chars = Some(min);
        self.max_chars = Some(max);
        self
    }

    /// Force or clear character counting
    pub fn with_char_count(mut self, use_char_count: Option<bool>) -> Self {
        self.use_char_count = use_char_count;
        self
    }

    pub fn with_page_break_on_title(mut self, enable: bool) -> Self {
        self.page_break_on_title = enable;
        self
    }

    pub fn with_eastern_language(mut self, eastern: bool) -> Self {
        self.is_eastern_language = eastern;
        self
    }

    pub fn with_book_complete(mut self, complete: bool) -> Self {
        self.is_book_complete = complete;
        self
    }

    pub fn with_char_multiplier(mut self, multiplier: f64) -> Self {
        self.char_multiplier = multiplier;
        self
    }

    /// Parse a configuration from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&data)
    }

    /// Counting mode after the auto setting and simple-mode override are applied
    pub fn counting_mode(&self) -> CountingMode {
        if !self.page_break_on_title {
            return CountingMode::Lines;
        }
        if self.use_char_count.unwrap_or(self.is_eastern_language) {
            CountingMode::Chars
        } else {
            CountingMode::Lines
        }
    }

    /// Resolve the `(min, max)` pair for the active counting mode
    pub fn resolve_limits(&self) -> Result<ResolvedLimits, PaginationError> {
        let mode = self.counting_mode();
        let (min, max) = match mode {
            CountingMode::Lines => match (self.min_lines, self.max_lines) {
                (Some(min), Some(max)) => (min, max),
                _ => {
                    return Err(PaginationError::InvalidConfig(
                        "line counting requires both minLines and maxLines".to_string(),
                    ))
                }
            },
            CountingMode::Chars => match (self.min_chars, self.max_chars) {
                (Some(min), Some(max)) if self.is_eastern_language => (min, max),
                (Some(min), Some(max)) => {
                    if !(self.char_multiplier.is_finite() && self.char_multiplier > 0.0) {
                        return Err(PaginationError::InvalidConfig(format!(
                            "charMultiplier must be positive, got {}",
                            self.char_multiplier
                        )));
                    }
                    (
                        scale(min, self.char_multiplier),
                        scale(max, self.char_multiplier),
                    )
                }
                _ => {
                    return Err(PaginationError::InvalidConfig(
                        "character counting requires both minChars and maxChars".to_string(),
                    ))
                }
            },
        };

        if max == 0 {
            return Err(PaginationError::InvalidConfig(
                "maximum page size must be positive".to_string(),
            ));
        }
        if min > max {
            return Err(PaginationError::InvalidConfig(format!(
                "minimum page size {} exceeds maximum {}",
                min, max
            )));
        }

        Ok(ResolvedLimits { mode, min, max })
    }
}

fn scale(limit: usize, multiplier: f64) -> usize {
    (limit as f64 * multiplier).round() as usize
}
