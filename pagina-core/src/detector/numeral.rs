//! Numeral parsing for Arabic, Roman and CJK chapter numbers

use serde::{Deserialize, Serialize};

/// Numeral system a chapter number is written in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum NumberType {
    Arabic,
    Roman,
    Chinese,
}

/// CJK numeral characters, including financial and traditional forms
pub(crate) const CJK_NUMERAL_CHARS: &str =
    "零〇一二三四五六七八九十百千万亿两兩壹贰貳叁參叄肆伍陆陸柒捌玖拾佰仟萬億";

impl NumberType {
    pub const ALL: [NumberType; 3] = [NumberType::Arabic, NumberType::Roman, NumberType::Chinese];

    pub fn as_str(&self) -> &'static str {
        match self {
            NumberType::Arabic => "arabic",
            NumberType::Roman => "roman",
            NumberType::Chinese => "chinese",
        }
    }

    /// Regex character class matching a single numeral character of this type
    pub fn char_class(&self) -> String {
        match self {
            NumberType::Arabic => "[0-9０-９]".to_string(),
            NumberType::Roman => "[IVXLCDM]".to_string(),
            NumberType::Chinese => format!("[0-9０-９{}]", CJK_NUMERAL_CHARS),
        }
    }

    /// Rank used to break score ties; a broader class matches more titles
    pub(crate) fn breadth(&self) -> u8 {
        match self {
            NumberType::Arabic => 0,
            NumberType::Roman => 1,
            NumberType::Chinese => 2,
        }
    }

    /// Parse a numeral written in this system
    pub fn parse(&self, text: &str) -> Option<u64> {
        match self {
            NumberType::Arabic => parse_arabic(text),
            NumberType::Roman => parse_roman(text),
            NumberType::Chinese => parse_chinese(text),
        }
    }
}

impl std::fmt::Display for NumberType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a numeral in any supported system.
///
/// Arabic is tried first, then Roman, then Chinese.
pub fn parse(text: &str) -> Option<u64> {
    parse_arabic(text)
        .or_else(|| parse_roman(text))
        .or_else(|| parse_chinese(text))
}

fn arabic_digit(ch: char) -> Option<u64> {
    match ch {
        '0'..='9' => Some(ch as u64 - '0' as u64),
        '０'..='９' => Some(ch as u64 - '０' as u64),
        _ => None,
    }
}

/// Parse ASCII or full-width decimal digits
pub fn parse_arabic(text: &str) -> Option<u64> {
    if text.is_empty() {
        return None;
    }
    text.chars().try_fold(0u64, |acc, ch| {
        acc.checked_mul(10)?.checked_add(arabic_digit(ch)?)
    })
}

fn roman_value(ch: char) -> Option<u64> {
    match ch {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}

/// Parse an uppercase Roman numeral.
///
/// Values are read left to right; a symbol followed by a larger one is
/// subtracted from it and both are consumed. Spellings that do not round-trip
/// to the canonical form (`IIII`, `VX`, `IC`) are rejected.
pub fn parse_roman(text: &str) -> Option<u64> {
    let values: Vec<u64> = text.chars().map(roman_value).collect::<Option<_>>()?;
    if values.is_empty() {
        return None;
    }

    let mut total = 0u64;
    let mut i = 0;
    while i < values.len() {
        let current = values[i];
        match values.get(i + 1) {
            Some(&next) if next > current => {
                total += next - current;
                i += 2;
            }
            _ => {
                total += current;
                i += 1;
            }
        }
    }

    (to_roman(total).as_deref() == Some(text)).then_some(total)
}

/// Canonical Roman spelling for `1..=3999`
pub fn to_roman(mut value: u64) -> Option<String> {
    const TABLE: [(u64, &str); 13] = [
        (1000, "M"),
        (900, "CM"),
        (500, "D"),
        (400, "CD"),
        (100, "C"),
        (90, "XC"),
        (50, "L"),
        (40, "XL"),
        (10, "X"),
        (9, "IX"),
        (5, "V"),
        (4, "IV"),
        (1, "I"),
    ];

    if value == 0 || value >= 4000 {
        return None;
    }

    let mut out = String::new();
    for (amount, symbol) in TABLE {
        while value >= amount {
            out.push_str(symbol);
            value -= amount;
        }
    }
    Some(out)
}

fn chinese_digit(ch: char) -> Option<u64> {
    match ch {
        '零' | '〇' => Some(0),
        '一' | '壹' => Some(1),
        '二' | '贰' | '貳' | '两' | '兩' => Some(2),
        '三' | '叁' | '參' | '叄' => Some(3),
        '四' | '肆' => Some(4),
        '五' | '伍' => Some(5),
        '六' | '陆' | '陸' => Some(6),
        '七' | '柒' => Some(7),
        '八' | '捌' => Some(8),
        '九' | '玖' => Some(9),
        _ => arabic_digit(ch),
    }
}

fn chinese_unit(ch: char) -> Option<u64> {
    match ch {
        '十' | '拾' => Some(10),
        '百' | '佰' => Some(100),
        '千' | '仟' => Some(1000),
        _ => None,
    }
}

fn chinese_myriad(ch: char) -> Option<u64> {
    match ch {
        '万' | '萬' => Some(10_000),
        '亿' | '億' => Some(100_000_000),
        _ => None,
    }
}

/// Parse a positional Chinese numeral such as `十二`, `一百零五` or `二〇二三`.
///
/// Digits may be written in simplified, traditional, financial, ASCII or
/// full-width form.
pub fn parse_chinese(text: &str) -> Option<u64> {
    let chars: Vec<char> = text.chars().collect();
    if chars.is_empty() {
        return None;
    }

    let positional = chars
        .iter()
        .any(|&c| chinese_unit(c).is_some() || chinese_myriad(c).is_some());

    if !positional {
        return chars.iter().try_fold(0u64, |acc, &ch| {
            acc.checked_mul(10)?.checked_add(chinese_digit(ch)?)
        });
    }

    // total: everything already multiplied by 万/亿
    // section: the part below the next myriad marker
    // pending: a digit waiting for its unit
    let mut total = 0u64;
    let mut section = 0u64;
    let mut pending: Option<u64> = None;

    for ch in chars {
        if let Some(digit) = chinese_digit(ch) {
            if matches!(pending, Some(d) if d != 0) {
                return None;
            }
            pending = Some(digit);
        } else if let Some(unit) = chinese_unit(ch) {
            let multiplier = match pending.take() {
                Some(0) => return None,
                Some(d) => d,
                None => 1,
            };
            section = section.checked_add(multiplier.checked_mul(unit)?)?;
        } else if let Some(myriad) = chinese_myriad(ch) {
            let part = section.checked_add(pending.take().unwrap_or(0))?;
            if part == 0 && total == 0 {
                return None;
            }
            total = if myriad == 100_000_000 {
                total.checked_add(part)?.checked_mul(myriad)?
            } else {
                total.checked_add(part.checked_mul(myriad)?)?
            };
            section = 0;
        } else {
            return None;
        }
    }

    total
        .checked_add(section)?
        .checked_add(pending.unwrap_or(0))
}

/// All numeral interpretations of a scanned run.
///
/// Pure digit runs read as Arabic, and also as Chinese when the surrounding
/// line is CJK text.
pub(crate) fn interpretations(numeral: &str, cjk_context: bool) -> Vec<(NumberType, u64)> {
    let mut parses = Vec::new();

    if let Some(value) = parse_arabic(numeral) {
        parses.push((NumberType::Arabic, value));
        if cjk_context {
            parses.push((NumberType::Chinese, value));
        }
        return parses;
    }

    if let Some(value) = parse_roman(numeral) {
        parses.push((NumberType::Roman, value));
    } else if let Some(value) = parse_chinese(numeral) {
        parses.push((NumberType::Chinese, value));
    }

    parses
}
