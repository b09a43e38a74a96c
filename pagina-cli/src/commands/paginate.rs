//! Paginate command implementation

use super::LimitArgs;
use anyhow::{Context, Result};
use pagina_core::{Document, PipelineOptions};
use std::fs::File;
use std::io::BufReader;

/// Paginate a text file and print its pages
pub fn paginate(
    input: &str,
    limits: &LimitArgs,
    detect: bool,
    title: Option<String>,
    json: bool,
) -> Result<()> {
    let mut options = PipelineOptions::new(limits.to_config()?).with_detection(detect);
    if let Some(title) = title {
        options = options.with_book_title(title);
    }

    let file =
        File::open(input).with_context(|| format!("Failed to open input file: {}", input))?;
    let mut reader = BufReader::new(file);

    let doc = Document::paginate_reader(&mut reader, &options)
        .with_context(|| format!("Failed to paginate {}", input))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    println!("Lines:       {}", doc.total_lines);
    println!("Titles:      {}", doc.titles.len());
    match &doc.rule {
        Some(rule) => println!(
            "Rule:        {} ({}, {:.2})",
            rule.template, rule.number_type, rule.score
        ),
        None => println!("Rule:        built-in"),
    }
    println!("Pages:       {}", doc.page_count());

    for (k, page) in doc.pages().iter().enumerate() {
        let chapter = doc.page_title(k).map(|t| t.text.as_str()).unwrap_or("");
        if page.is_empty() {
            println!("  {:>4}  (empty)", k + 1);
        } else {
            println!("  {:>4}  lines {}-{}  {}", k + 1, page.start + 1, page.end, chapter);
        }
    }

    Ok(())
}
