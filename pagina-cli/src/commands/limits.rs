//! Page size options shared by the paginate and batch commands

use anyhow::{Context, Result};
use clap::Args;
use pagina_core::PaginationConfig;

/// Line limits used when neither a config file nor a flag sets them
pub const DEFAULT_LINE_LIMITS: (usize, usize) = (10, 30);

/// Character limits used when neither a config file nor a flag sets them
pub const DEFAULT_CHAR_LIMITS: (usize, usize) = (300, 900);

/// Pagination settings: a JSON config file plus per-field overrides
#[derive(Args, Debug, Clone, Default)]
pub struct LimitArgs {
    /// JSON configuration file (camelCase keys)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Maximum content lines per page
    #[arg(long)]
    pub max_lines: Option<usize>,

    /// Minimum content lines per page
    #[arg(long)]
    pub min_lines: Option<usize>,

    /// Maximum characters per page
    #[arg(long)]
    pub max_chars: Option<usize>,

    /// Minimum characters per page
    #[arg(long)]
    pub min_chars: Option<usize>,

    /// Count characters instead of lines (true or false; auto when omitted)
    #[arg(long, value_name = "BOOL", action = clap::ArgAction::Set)]
    pub char_count: Option<bool>,

    /// Fixed-size pages that ignore chapter titles
    #[arg(long)]
    pub simple: bool,

    /// Treat the text as an Eastern language (characters counted unscaled)
    #[arg(long)]
    pub eastern: bool,

    /// The book is finished; its last title is an end marker
    #[arg(long)]
    pub complete: bool,
}

impl LimitArgs {
    /// Build the effective configuration
    pub fn to_config(&self) -> Result<PaginationConfig> {
        let mut config = match &self.config {
            Some(path) => PaginationConfig::from_json_file(path)
                .with_context(|| format!("Failed to load configuration from {}", path))?,
            None => PaginationConfig::default(),
        };

        if self.max_lines.is_some() {
            config.max_lines = self.max_lines;
        }
        if self.min_lines.is_some() {
            config.min_lines = self.min_lines;
        }
        if self.max_chars.is_some() {
            config.max_chars = self.max_chars;
        }
        if self.min_chars.is_some() {
            config.min_chars = self.min_chars;
        }
        if self.char_count.is_some() {
            config.use_char_count = self.char_count;
        }
        if self.simple {
            config.page_break_on_title = false;
        }
        if self.eastern {
            config.is_eastern_language = true;
        }
        if self.complete {
            config.is_book_complete = true;
        }

        let (min_lines, max_lines) = DEFAULT_LINE_LIMITS;
        config.min_lines.get_or_insert(min_lines);
        config.max_lines.get_or_insert(max_lines);
        let (min_chars, max_chars) = DEFAULT_CHAR_LIMITS;
        config.min_chars.get_or_insert(min_chars);
        config.max_chars.get_or_insert(max_chars);

        tracing::debug!(?config, "Effective pagination config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_limits() {
        let config = LimitArgs::default().to_config().unwrap();
        assert_eq!(config.min_lines, Some(10));
        assert_eq!(config.max_lines, Some(30));
        assert!(config.page_break_on_title);
    }

    #[test]
    fn test_flags_override() {
        let args = LimitArgs {
            max_lines: Some(12),
            min_lines: Some(3),
            simple: true,
            eastern: true,
            ..LimitArgs::default()
        };
        let config = args.to_config().unwrap();
        assert_eq!(config.max_lines, Some(12));
        assert_eq!(config.min_lines, Some(3));
        assert!(!config.page_break_on_title);
        assert!(config.is_eastern_language);
    }
}
