//! Title entry type

use serde::{Deserialize, Serialize};

/// A chapter title and the line it sits on
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TitleEntry {
    /// Display text of the title
    pub text: String,

    /// Line the title occupies
    pub line_index: usize,
}

impl TitleEntry {
    /// Create a new title entry
    pub fn new(text: impl Into<String>, line_index: usize) -> Self {
        Self {
            text: text.into(),
            line_index,
        }
    }
}

impl<S: Into<String>> From<(S, usize)> for TitleEntry {
    fn from((text, line_index): (S, usize)) -> Self {
        Self::new(text, line_index)
    }
}
