//! Title keyword vocabulary and character predicates used by the detector

/// Words that may precede a chapter number, lowercase
const TITLE_WORDS: &[&str] = &[
    // English
    "chapter", "chap", "ch", "part", "book", "volume", "vol", "section", "sect", "episode",
    "act", "scene", "canto", "letter", "lesson", "stave", "story", "tale", "day", "no",
    // French
    "chapitre", "partie", "livre", "tome", "scène",
    // German
    "kapitel", "teil", "buch", "band", "abschnitt",
    // Spanish, Portuguese, Italian
    "capítulo", "capitulo", "parte", "libro", "livro", "capitolo", "tomo", "escena",
    // Dutch, Polish
    "hoofdstuk", "deel", "rozdział", "rozdzial", "część",
    // Russian, Ukrainian
    "глава", "часть", "книга", "том", "раздел", "розділ", "частина",
];

/// CJK characters that may precede a chapter number (第, 卷, 제 ...)
const CJK_PREFIX_CHARS: &str = "第卷章回节節部篇集话話幕序番外正文上中下之其제권부";

/// CJK characters that may follow a chapter number (章, 回, 장 ...)
const CJK_SUFFIX_CHARS: &str = "章回节節卷部篇集话話幕折出장화권편부";

pub(crate) fn is_cjk(ch: char) -> bool {
    matches!(ch,
        '\u{3040}'..='\u{30FF}'   // Hiragana, Katakana
        | '\u{3400}'..='\u{4DBF}' // CJK Extension A
        | '\u{4E00}'..='\u{9FFF}' // CJK Unified Ideographs
        | '\u{F900}'..='\u{FAFF}' // CJK Compatibility Ideographs
        | '\u{AC00}'..='\u{D7AF}' // Hangul syllables
    )
}

pub(crate) fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

pub(crate) fn is_cjk_suffix(ch: char) -> bool {
    CJK_SUFFIX_CHARS.contains(ch)
}

/// ASCII and common CJK/typographic punctuation
pub(crate) fn is_punctuation(ch: char) -> bool {
    ch.is_ascii_punctuation()
        || matches!(
            ch,
            '、' | '。'
                | '，'
                | '：'
                | '；'
                | '！'
                | '？'
                | '·'
                | '・'
                | '—'
                | '–'
                | '－'
                | '（'
                | '）'
                | '【'
                | '】'
                | '《'
                | '》'
                | '〈'
                | '〉'
                | '「'
                | '」'
                | '『'
                | '』'
                | '“'
                | '”'
                | '‘'
                | '’'
                | '…'
                | '．'
                | '〔'
                | '〕'
                | '§'
        )
}

/// Characters a title template may legitimately end after
pub(crate) fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || is_punctuation(ch) || is_cjk_suffix(ch)
}

/// Whether the text before a numeral is made of title keywords.
///
/// Latin and Cyrillic tokens must be whole vocabulary words; CJK tokens are
/// checked character by character.
pub(crate) fn is_title_prefix(prefix: &str) -> bool {
    let mut tokens = prefix
        .split(|c: char| c.is_whitespace() || is_punctuation(c))
        .filter(|t| !t.is_empty())
        .peekable();

    if tokens.peek().is_none() {
        return false;
    }

    tokens.all(|token| {
        if token.chars().all(is_cjk) {
            token.chars().all(|c| CJK_PREFIX_CHARS.contains(c))
        } else {
            let lower = token.to_lowercase();
            TITLE_WORDS.contains(&lower.as_str())
        }
    })
}

/// Whether the text after a line-leading numeral marks it as a title
pub(crate) fn is_title_suffix(suffix: &str) -> bool {
    let trimmed = suffix.trim();
    if trimmed.chars().all(is_punctuation) {
        return true;
    }
    trimmed.chars().next().map(is_cjk_suffix).unwrap_or(false)
}

/// Whether the numeral/prefix/suffix split can belong to a title line
pub(crate) fn is_plausible_template(prefix: &str, suffix: &str) -> bool {
    if prefix.trim().is_empty() {
        is_title_suffix(suffix)
    } else {
        is_title_prefix(prefix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_prefix_words() {
        assert!(is_title_prefix("Chapter "));
        assert!(is_title_prefix("CHAPTER "));
        assert!(is_title_prefix("Ch. "));
        assert!(is_title_prefix("Book - Part "));
        assert!(!is_title_prefix("Book One, Part "));
        assert!(is_title_prefix("Глава "));
        assert!(!is_title_prefix("He walked "));
        assert!(!is_title_prefix(""));
    }

    #[test]
    fn test_title_prefix_cjk() {
        assert!(is_title_prefix("第"));
        assert!(is_title_prefix("卷之"));
        assert!(is_title_prefix("正文 第"));
        assert!(!is_title_prefix("他"));
        assert!(!is_title_prefix("第一次见"));
    }

    #[test]
    fn test_leading_numeral_suffix() {
        assert!(is_plausible_template("", "."));
        assert!(is_plausible_template("", ""));
        assert!(is_plausible_template("", "章 风起"));
        assert!(!is_plausible_template("", " went home"));
        assert!(!is_plausible_template("", "个人"));
    }

    #[test]
    fn test_separators() {
        assert!(is_separator(' '));
        assert!(is_separator(':'));
        assert!(is_separator('章'));
        assert!(is_separator('、'));
        assert!(!is_separator('a'));
        assert!(!is_separator('次'));
    }
}
