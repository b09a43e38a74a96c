//! Title pattern detection
//!
//! Mines the raw lines of a plain-text book for a recurring chapter-title
//! format (`第12章 ...`, `Chapter XII`, `3.`) and compiles the best one into
//! a [`CompiledTitleRule`]. Detection is a pure function of its input: every
//! call starts from scratch and returns its result by value.

pub mod numeral;
mod rule;
mod vocabulary;

pub use numeral::NumberType;
pub use rule::{CompiledTitleRule, RuleSummary, TRAILING_TEXT_CAP};

use crate::error::DetectionError;
use regex::Regex;
use std::collections::{BTreeMap, BTreeSet};
use vocabulary::{contains_cjk, is_plausible_template, is_separator};

/// Lines longer than this (in characters) are never titles
pub const MAX_TITLE_LINE_CHARS: usize = 100;

/// Candidates scoring at or below this are discarded
pub const MIN_PATTERN_SCORE: f64 = 0.3;

/// Shortest common template, placeholder included
pub const MIN_TEMPLATE_CHARS: usize = 3;

/// Roman values that show up in prose as pronouns or abbreviations
const PROSE_ROMAN_VALUES: [u64; 6] = [5, 10, 50, 100, 500, 1000];

/// Stand-in for the numeral inside a template
const PLACEHOLDER: char = '\u{E000}';

/// A scored (template, number type) pair
#[derive(Debug, Clone, PartialEq)]
pub struct PatternCandidate {
    /// Display template, `{n}` for the numeral and `{text}` for free text
    pub template: String,
    /// Literal text before the numeral
    pub prefix: String,
    /// Literal text after the numeral
    pub suffix: String,
    pub number_type: NumberType,
    pub score: f64,
    /// Chapter numbers in document order
    pub numbers: Vec<u64>,
    /// Whether any source line continues past the template
    pub has_trailing_text: bool,
}

/// A line whose numeral was parsed and replaced by the placeholder
#[derive(Debug)]
struct NumberedLine {
    template: Vec<char>,
    placeholder_at: usize,
    parses: Vec<(NumberType, u64)>,
}

impl NumberedLine {
    fn value(&self, number_type: NumberType) -> Option<u64> {
        self.parses
            .iter()
            .find(|(t, _)| *t == number_type)
            .map(|(_, v)| *v)
    }
}

/// Detector for recurring chapter-title formats
#[derive(Debug, Clone)]
pub struct TitlePatternDetector {
    numeral_scanner: Regex,
    min_score: f64,
    max_line_chars: usize,
}

impl Default for TitlePatternDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl TitlePatternDetector {
    pub fn new() -> Self {
        let pattern = format!(
            "[0-9０-９{}]+|[IVXLCDM]+",
            numeral::CJK_NUMERAL_CHARS
        );
        Self {
            numeral_scanner: Regex::new(&pattern).expect("numeral scanner pattern is valid"),
            min_score: MIN_PATTERN_SCORE,
            max_line_chars: MAX_TITLE_LINE_CHARS,
        }
    }

    /// Override the acceptance threshold
    pub fn with_min_score(mut self, min_score: f64) -> Self {
        self.min_score = min_score;
        self
    }

    /// Override the line length cap
    pub fn with_max_line_chars(mut self, max_line_chars: usize) -> Self {
        self.max_line_chars = max_line_chars;
        self
    }

    /// Infer the best title rule for a document, if any format recurs.
    ///
    /// A winning template that fails to compile is logged and treated as no
    /// detection.
    pub fn detect<S: AsRef<str>>(&self, lines: &[S]) -> Option<CompiledTitleRule> {
        match self.try_detect(lines) {
            Ok(rule) => rule,
            Err(e) => {
                tracing::warn!("Discarding detected title pattern: {}", e);
                None
            }
        }
    }

    /// Like [`TitlePatternDetector::detect`] but reports compile failures
    pub fn try_detect<S: AsRef<str>>(
        &self,
        lines: &[S],
    ) -> Result<Option<CompiledTitleRule>, DetectionError> {
        let Some(best) = self.best_per_type(lines).into_iter().next() else {
            tracing::debug!(lines = lines.len(), "No recurring title pattern");
            return Ok(None);
        };

        let rule = CompiledTitleRule::compile(&best)?;
        tracing::debug!(
            template = %rule.template(),
            number_type = %rule.number_type(),
            score = rule.score(),
            "Detected title pattern"
        );
        Ok(Some(rule))
    }

    /// Best candidate of each number type, best first
    pub fn best_per_type<S: AsRef<str>>(&self, lines: &[S]) -> Vec<PatternCandidate> {
        let mut best: BTreeMap<NumberType, PatternCandidate> = BTreeMap::new();
        for candidate in self.candidates(lines) {
            let replace = best
                .get(&candidate.number_type)
                .map(|current| ranks_above(&candidate, current))
                .unwrap_or(true);
            if replace {
                best.insert(candidate.number_type, candidate);
            }
        }

        let mut winners: Vec<PatternCandidate> = best.into_values().collect();
        winners.sort_by(|a, b| {
            if ranks_above(a, b) {
                std::cmp::Ordering::Less
            } else if ranks_above(b, a) {
                std::cmp::Ordering::Greater
            } else {
                std::cmp::Ordering::Equal
            }
        });
        winners
    }

    /// Every (template, number type) pair scoring above the threshold
    pub fn candidates<S: AsRef<str>>(&self, lines: &[S]) -> Vec<PatternCandidate> {
        let numbered: Vec<NumberedLine> = lines
            .iter()
            .filter_map(|line| self.scan_line(line.as_ref()))
            .collect();

        if numbered.len() < 2 {
            return Vec::new();
        }

        let groups = group_by_common_template(&numbered);
        let total_lines = lines.len();

        let mut candidates = Vec::new();
        for (template, members) in &groups {
            for number_type in NumberType::ALL {
                if let Some(candidate) =
                    score_group(template, members, &numbered, number_type, total_lines)
                {
                    if candidate.score > self.min_score {
                        candidates.push(candidate);
                    }
                }
            }
        }

        tracing::trace!(
            numbered = numbered.len(),
            groups = groups.len(),
            candidates = candidates.len(),
            "Scored title templates"
        );

        candidates
    }

    /// Locate, parse and template the first numeral of a line
    fn scan_line(&self, line: &str) -> Option<NumberedLine> {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.chars().count() > self.max_line_chars {
            return None;
        }

        let found = self
            .numeral_scanner
            .find_iter(trimmed)
            .find(|m| !is_embedded_roman(trimmed, m.start(), m.end()))?;

        let parses = numeral::interpretations(found.as_str(), contains_cjk(trimmed));
        if parses.is_empty() {
            return None;
        }

        let prefix = &trimmed[..found.start()];
        let suffix = &trimmed[found.end()..];
        if !is_plausible_template(prefix, suffix) {
            return None;
        }

        let mut template: Vec<char> = prefix.chars().collect();
        let placeholder_at = template.len();
        template.push(PLACEHOLDER);
        template.extend(suffix.chars());

        Some(NumberedLine {
            template,
            placeholder_at,
            parses,
        })
    }
}

/// Run detection with the default settings
pub fn detect<S: AsRef<str>>(lines: &[S]) -> Option<CompiledTitleRule> {
    TitlePatternDetector::new().detect(lines)
}

/// A Roman-letter run inside a Latin word (the C of "CHAPTER", the M of "Mix") is not a numeral
fn is_embedded_roman(line: &str, start: usize, end: usize) -> bool {
    let first = line[start..].chars().next();
    if !first.map(|c| c.is_ascii_uppercase()).unwrap_or(false) {
        return false;
    }
    let before = line[..start].chars().next_back();
    let after = line[end..].chars().next();
    before.map(|c| c.is_ascii_alphabetic()).unwrap_or(false)
        || after.map(|c| c.is_ascii_alphabetic()).unwrap_or(false)
}

/// Pair every numbered line with every other and group by shared template
fn group_by_common_template(numbered: &[NumberedLine]) -> BTreeMap<Vec<char>, BTreeSet<usize>> {
    let mut groups: BTreeMap<Vec<char>, BTreeSet<usize>> = BTreeMap::new();
    for i in 0..numbered.len() {
        for j in (i + 1)..numbered.len() {
            if let Some(template) = common_template(&numbered[i], &numbered[j]) {
                let members = groups.entry(template).or_default();
                members.insert(i);
                members.insert(j);
            }
        }
    }
    groups
}

/// Longest common template of two lines ending at a clean boundary
fn common_template(a: &NumberedLine, b: &NumberedLine) -> Option<Vec<char>> {
    if a.placeholder_at != b.placeholder_at {
        return None;
    }
    let placeholder_end = a.placeholder_at + 1;

    let raw_len = a
        .template
        .iter()
        .zip(&b.template)
        .take_while(|(x, y)| x == y)
        .count();
    if raw_len < placeholder_end {
        return None;
    }

    let both_complete = raw_len == a.template.len() && raw_len == b.template.len();
    let mut end = raw_len;
    if !both_complete {
        while end > placeholder_end && !is_separator(a.template[end - 1]) {
            end -= 1;
        }
    }

    let mut common: Vec<char> = a.template[..end].to_vec();
    while common.len() > placeholder_end
        && common.last().map(|c| c.is_whitespace()).unwrap_or(false)
    {
        common.pop();
    }

    let prefix: String = common[..a.placeholder_at].iter().collect();
    let suffix: String = common[placeholder_end..].iter().collect();
    if !is_plausible_template(&prefix, &suffix) {
        return None;
    }

    (common.len() >= MIN_TEMPLATE_CHARS).then_some(common)
}

/// Score one (template, number type) pair of a group
fn score_group(
    template: &[char],
    members: &BTreeSet<usize>,
    numbered: &[NumberedLine],
    number_type: NumberType,
    total_lines: usize,
) -> Option<PatternCandidate> {
    let matching: Vec<&NumberedLine> = members
        .iter()
        .map(|&i| &numbered[i])
        .filter(|line| line.value(number_type).is_some())
        .collect();
    if matching.len() < 2 || total_lines == 0 {
        return None;
    }

    let numbers: Vec<u64> = matching
        .iter()
        .filter_map(|line| line.value(number_type))
        .collect();

    let has_trailing_text = matching.iter().any(|line| {
        line.template[template.len()..]
            .iter()
            .any(|c| !c.is_whitespace())
    });

    let frequency = numbers.len() as f64 / total_lines as f64;
    let mut score = (frequency * 10.0).min(0.4);
    if is_mostly_contiguous(&numbers) {
        score += 0.3;
    }
    score += (template.len() as f64 / 10.0).min(0.3);
    if number_type == NumberType::Roman && looks_like_prose_roman(&numbers) {
        score *= 0.1;
    }

    let placeholder_at = template.iter().position(|&c| c == PLACEHOLDER)?;
    let prefix: String = template[..placeholder_at].iter().collect();
    let suffix: String = template[placeholder_at + 1..].iter().collect();
    let mut display = format!("{}{{n}}{}", prefix, suffix);
    if has_trailing_text {
        display.push_str("{text}");
    }

    Some(PatternCandidate {
        template: display,
        prefix,
        suffix,
        number_type,
        score,
        numbers,
        has_trailing_text,
    })
}

/// Mean gap under 5 and fewer than 30% of steps skipping numbers
fn is_mostly_contiguous(numbers: &[u64]) -> bool {
    if numbers.len() < 2 {
        return false;
    }
    let gaps: Vec<u64> = numbers.windows(2).map(|w| w[0].abs_diff(w[1])).collect();
    let mean_gap = gaps.iter().sum::<u64>() as f64 / gaps.len() as f64;
    let gapped = gaps.iter().filter(|&&g| g != 1).count() as f64 / gaps.len() as f64;
    mean_gap < 5.0 && gapped < 0.3
}

/// Roman "numbers" that are really words: a lone `I`, or only `V`/`X`/`L`/`C`/`D`/`M`
fn looks_like_prose_roman(numbers: &[u64]) -> bool {
    let has_small = numbers.iter().any(|n| (1..=4).contains(n));
    let large_only = numbers.iter().all(|n| PROSE_ROMAN_VALUES.contains(n)) && !has_small;
    let one_without_two = numbers.contains(&1) && !numbers.contains(&2);
    large_only || one_without_two
}

/// Higher score first; ties go to the broader numeral class, then more matches
fn ranks_above(a: &PatternCandidate, b: &PatternCandidate) -> bool {
    a.score
        .total_cmp(&b.score)
        .then_with(|| a.number_type.breadth().cmp(&b.number_type.breadth()))
        .then_with(|| a.numbers.len().cmp(&b.numbers.len()))
        .then_with(|| b.template.cmp(&a.template))
        .is_gt()
}
