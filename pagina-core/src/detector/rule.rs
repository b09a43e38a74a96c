//! Compiled title rule produced by the detector

use super::numeral::NumberType;
use super::PatternCandidate;
use crate::error::DetectionError;
use regex::Regex;
use serde::Serialize;

/// Longest free text accepted after a title's fixed part
pub const TRAILING_TEXT_CAP: usize = 80;

/// An anchored regular expression matching one inferred title format
#[derive(Debug, Clone)]
pub struct CompiledTitleRule {
    template: String,
    number_type: NumberType,
    score: f64,
    matched_lines: usize,
    has_trailing_text: bool,
    regex: Regex,
}

/// Serializable description of a compiled rule
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuleSummary {
    pub template: String,
    pub number_type: NumberType,
    pub score: f64,
    pub matched_lines: usize,
    pub pattern: String,
}

impl CompiledTitleRule {
    /// Compile a scored candidate into a rule
    pub fn compile(candidate: &PatternCandidate) -> Result<Self, DetectionError> {
        let mut pattern = String::from(r"^\s*");
        pattern.push_str(&literal(&candidate.prefix));
        pattern.push('(');
        pattern.push_str(&candidate.number_type.char_class());
        pattern.push_str("+)");
        pattern.push_str(&literal(&candidate.suffix));
        if candidate.has_trailing_text {
            pattern.push_str(&format!(r"(?:\s*(.{{0,{}}}))?", TRAILING_TEXT_CAP));
        }
        pattern.push_str(r"\s*$");

        let regex = Regex::new(&pattern).map_err(|source| DetectionError::RuleCompile {
            template: candidate.template.clone(),
            source,
        })?;

        Ok(Self {
            template: candidate.template.clone(),
            number_type: candidate.number_type,
            score: candidate.score,
            matched_lines: candidate.numbers.len(),
            has_trailing_text: candidate.has_trailing_text,
            regex,
        })
    }

    /// Display template, `{n}` standing for the numeral and `{text}` for free text
    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn number_type(&self) -> NumberType {
        self.number_type
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// Number of source lines the rule was inferred from
    pub fn matched_lines(&self) -> usize {
        self.matched_lines
    }

    pub fn has_trailing_text(&self) -> bool {
        self.has_trailing_text
    }

    /// The underlying regular expression source
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }

    /// Whether a line is a title under this rule
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// Chapter number of a matching line
    pub fn number(&self, line: &str) -> Option<u64> {
        let caps = self.regex.captures(line)?;
        self.number_type.parse(caps.get(1)?.as_str())
    }

    /// Free text following the numbered part of a matching line
    pub fn trailing_text<'a>(&self, line: &'a str) -> Option<&'a str> {
        let caps = self.regex.captures(line)?;
        caps.get(2)
            .map(|m| m.as_str().trim())
            .filter(|s| !s.is_empty())
    }

    pub fn summary(&self) -> RuleSummary {
        RuleSummary {
            template: self.template.clone(),
            number_type: self.number_type,
            score: self.score,
            matched_lines: self.matched_lines,
            pattern: self.pattern().to_string(),
        }
    }
}

/// Escape template text, letting whitespace runs match any whitespace
fn literal(text: &str) -> String {
    let mut out = String::new();
    let mut in_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !in_space {
                out.push_str(r"\s*");
                in_space = true;
            }
        } else {
            in_space = false;
            out.push_str(&regex::escape(ch.encode_utf8(&mut [0u8; 4])));
        }
    }
    out
}
