//! Line classification
//!
//! The pagination calculator only sees [`ContentChunk`]s. Anything that can
//! tag lines consistently with the title registry may feed it; this module
//! provides the trait and a rule-based implementation for plain text.

use crate::detector::{CompiledTitleRule, MAX_TITLE_LINE_CHARS};
use crate::types::{ContentChunk, ElementType};
use regex::Regex;

/// Trait for tagging physical lines with an element kind and size
pub trait LineClassifier {
    /// Classify the line at `index`
    fn classify(&self, index: usize, line: &str) -> ContentChunk;

    /// Display text of a title line, or `None` if the line is not a title
    fn title_text(&self, line: &str) -> Option<String>;

    /// Classify every line of a document
    fn classify_lines(&self, lines: &[&str]) -> Vec<ContentChunk> {
        lines
            .iter()
            .enumerate()
            .map(|(index, line)| self.classify(index, line))
            .collect()
    }
}

/// Built-in title patterns used when no rule was inferred
const BUILTIN_TITLE_PATTERNS: &[&str] = &[
    r"^\s*第\s*[0-9０-９零〇一二三四五六七八九十百千万两兩壹贰貳叁參肆伍陆陸柒捌玖拾佰仟]+\s*[章回节節卷部篇集话話幕]",
    r"^\s*(?i:chapter|part|book|volume)\s+(?:[0-9]+|[IVXLCDM]+)\b",
    r"^\s*(?:序章|序言|楔子|引子|尾声|尾聲|后记|後記|番外|(?i:prologue|epilogue))(?:[\s：:].*)?$",
];

/// Classifier driven by a detected title rule or the built-in title patterns
#[derive(Debug, Clone)]
pub struct RuleClassifier {
    rule: Option<CompiledTitleRule>,
    builtin: Vec<Regex>,
    markup: Regex,
    emphasis: Regex,
    heading_marker: Regex,
    boilerplate: Regex,
    punctuation_only: Regex,
}

impl Default for RuleClassifier {
    fn default() -> Self {
        Self::new(None)
    }
}

impl RuleClassifier {
    /// Create a classifier, preferring `rule` over the built-in patterns
    pub fn new(rule: Option<CompiledTitleRule>) -> Self {
        Self {
            rule,
            builtin: BUILTIN_TITLE_PATTERNS
                .iter()
                .map(|p| Regex::new(p).expect("built-in title pattern is valid"))
                .collect(),
            markup: Regex::new(r"<[^>]*>").expect("markup pattern is valid"),
            emphasis: Regex::new(r"[*_~`]+").expect("emphasis pattern is valid"),
            heading_marker: Regex::new(r"^\s*#{1,6}\s+").expect("heading pattern is valid"),
            boilerplate: Regex::new(r"^\s*(?:作者|書名|书名|(?i:author|title))\s*[:：]\s*")
                .expect("boilerplate pattern is valid"),
            punctuation_only: Regex::new(r"^[\p{P}\p{S}\p{Pd}\s]*$")
                .expect("punctuation pattern is valid"),
        }
    }

    /// Swap the title rule, keeping the compiled stripping patterns
    pub fn with_rule(mut self, rule: Option<CompiledTitleRule>) -> Self {
        self.rule = rule;
        self
    }

    /// The inferred rule in use, if any
    pub fn rule(&self) -> Option<&CompiledTitleRule> {
        self.rule.as_ref()
    }

    /// Remove markup, Markdown markers and title/author labels
    pub fn strip(&self, line: &str) -> String {
        let text = self.markup.replace_all(line, "");
        let text = self.heading_marker.replace(&text, "");
        let text = self.emphasis.replace_all(&text, "");
        let text = self.boilerplate.replace(&text, "");
        text.trim().to_string()
    }

    /// Stripped text of every line, as title rules are matched against it
    pub fn strip_lines<S: AsRef<str>>(&self, lines: &[S]) -> Vec<String> {
        lines.iter().map(|line| self.strip(line.as_ref())).collect()
    }

    /// Visible characters of already stripped text
    fn visible_chars(text: &str) -> usize {
        text.chars().filter(|c| !c.is_whitespace()).count()
    }

    fn is_title(&self, stripped: &str) -> bool {
        if stripped.is_empty() || stripped.chars().count() > MAX_TITLE_LINE_CHARS {
            return false;
        }
        match &self.rule {
            Some(rule) => rule.is_match(stripped),
            None => self.builtin.iter().any(|re| re.is_match(stripped)),
        }
    }
}

impl LineClassifier for RuleClassifier {
    fn classify(&self, index: usize, line: &str) -> ContentChunk {
        let stripped = self.strip(line);

        if self.punctuation_only.is_match(&stripped) {
            return ContentChunk::empty(index);
        }

        let char_count = Self::visible_chars(&stripped);
        let element_type = if self.is_title(&stripped) {
            ElementType::Title
        } else if self.heading_marker.is_match(line) {
            ElementType::Heading
        } else {
            ElementType::Paragraph
        };

        ContentChunk::new(index, element_type, char_count)
    }

    fn title_text(&self, line: &str) -> Option<String> {
        let stripped = self.strip(line);
        self.is_title(&stripped).then_some(stripped)
    }
}
