//! Pagination tests for pagina-core
//!
//! These tests drive the calculator and the document pipeline through the
//! public API only.
//!
//! ## Test Strategy
//!
//! 1. **Scenario tests**: title detection on numbered CJK chapters, merging a
//!    short chapter into the title page, and the empty document
//! 2. **Law tests**: merging of small neighbours and repeatability
//! 3. **Configuration tests**: JSON config files and their failure modes

use pagina_core::types::{ContentChunk, PaginationConfig, TitleEntry};
use pagina_core::{
    detector, ConfigError, Document, NumberType, PaginaError, PaginationCalculator,
    PaginationError, PipelineOptions,
};
use std::io::Write;

// =============================================================================
// Helpers
// =============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("pagina_core=debug")
        .with_test_writer()
        .try_init();
}

/// A title-page line followed by chapters of the given body sizes
fn chapters(sizes: &[usize]) -> (Vec<ContentChunk>, Vec<TitleEntry>) {
    let mut chunks = vec![ContentChunk::paragraph(0, 12)];
    let mut titles = vec![TitleEntry::new("Title Page", 0)];
    for (n, &size) in sizes.iter().enumerate() {
        let line = chunks.len();
        chunks.push(ContentChunk::title(line, 10));
        titles.push(TitleEntry::new(format!("Chapter {}", n + 1), line));
        for _ in 0..size {
            let index = chunks.len();
            chunks.push(ContentChunk::paragraph(index, 40));
        }
    }
    (chunks, titles)
}

fn calculate(
    chunks: &[ContentChunk],
    titles: &[TitleEntry],
    config: &PaginationConfig,
) -> Vec<usize> {
    PaginationCalculator::new(chunks, titles, config)
        .expect("valid calculator input")
        .calculate()
        .into_vec()
}

// =============================================================================
// Scenario Tests
// =============================================================================

#[test]
fn test_detects_numbered_chinese_chapters() {
    let lines = ["第1章 序言", "正文……", "第2章 开始", "正文……", "第3章 结束"];
    let rule = detector::detect(&lines).expect("title pattern");

    assert_eq!(rule.template(), "第{n}章{text}");
    assert_eq!(rule.number_type(), NumberType::Chinese);
    assert!(rule.score() > detector::MIN_PATTERN_SCORE);
}

#[test]
fn test_short_chapter_merges_into_title_page() {
    init_tracing();
    // title page line, a 3-line chapter (title + 2), a 21-line chapter (title + 20)
    let mut chunks = vec![ContentChunk::paragraph(0, 12), ContentChunk::title(1, 9)];
    chunks.push(ContentChunk::paragraph(2, 30));
    chunks.push(ContentChunk::paragraph(3, 30));
    chunks.push(ContentChunk::title(4, 9));
    for index in 5..25 {
        chunks.push(ContentChunk::paragraph(index, 30));
    }
    let titles = vec![
        TitleEntry::new("Title Page", 0),
        TitleEntry::new("Chapter 1", 1),
        TitleEntry::new("Chapter 2", 4),
    ];
    let config = PaginationConfig::new().with_lines(2, 10);

    let breaks = calculate(&chunks, &titles, &config);
    assert_eq!(breaks, vec![0, 4, 15]);
}

#[test]
fn test_empty_input_is_single_page() {
    let titles = vec![TitleEntry::new("Title Page", 0)];
    let config = PaginationConfig::new().with_lines(2, 10);
    assert_eq!(calculate(&[], &titles, &config), vec![0]);
}

// =============================================================================
// Law Tests
// =============================================================================

#[test]
fn test_neighbours_fitting_together_share_a_page() {
    let (chunks, titles) = chapters(&[4, 5]);
    let config = PaginationConfig::new().with_lines(3, 10);
    assert_eq!(calculate(&chunks, &titles, &config), vec![0]);
}

#[test]
fn test_long_chapters_stay_on_their_own_pages() {
    let (chunks, titles) = chapters(&[9, 9, 9]);
    let config = PaginationConfig::new().with_lines(3, 10);
    // first page holds the title-page line and chapter one
    assert_eq!(calculate(&chunks, &titles, &config), vec![0, 11, 21]);
}

#[test]
fn test_fresh_calculators_agree() {
    let (chunks, titles) = chapters(&[3, 27, 1, 14, 40, 2]);
    let config = PaginationConfig::new().with_lines(4, 12);
    let first = calculate(&chunks, &titles, &config);
    let second = calculate(&chunks, &titles, &config);
    assert_eq!(first, second);
}

#[test]
fn test_western_char_limits_are_scaled() {
    let (chunks, titles) = chapters(&[30]);
    let config = PaginationConfig::new()
        .with_chars(100, 200)
        .with_char_count(Some(true));
    let calc = PaginationCalculator::new(&chunks, &titles, &config).unwrap();
    let limits = calc.limits();
    assert_eq!((limits.min, limits.max), (300, 600));
    // the short tail borrows lines from the page before it
    let breaks = calc.calculate();
    assert_eq!(breaks, vec![0, 16, 24]);
}

#[test]
fn test_pipeline_errors_surface_as_pagina_errors() {
    let config = PaginationConfig::new().with_lines(10, 2);
    let err = Document::paginate("Chapter 1\ntext", &PipelineOptions::new(config)).unwrap_err();
    assert!(matches!(
        err,
        PaginaError::Pagination(PaginationError::InvalidConfig(_))
    ));
}

// =============================================================================
// Configuration Tests
// =============================================================================

#[test]
fn test_config_from_json_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"{{"maxChars": 900, "minChars": 300, "isEasternLanguage": true, "isBookComplete": true}}"#
    )
    .unwrap();

    let config = PaginationConfig::from_json_file(file.path()).unwrap();
    assert_eq!(config.max_chars, Some(900));
    assert!(config.is_eastern_language);
    assert!(config.is_book_complete);
    assert!(config.page_break_on_title);
    assert_eq!(config.use_char_count, None);

    let limits = config.resolve_limits().unwrap();
    assert_eq!((limits.min, limits.max), (300, 900));
}

#[test]
fn test_config_errors() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(
        PaginationConfig::from_json_file(&missing),
        Err(ConfigError::Read { .. })
    ));

    let malformed = dir.path().join("malformed.json");
    std::fs::write(&malformed, "{ maxLines: 10 ").unwrap();
    assert!(matches!(
        PaginationConfig::from_json_file(&malformed),
        Err(ConfigError::Malformed(_))
    ));
}
