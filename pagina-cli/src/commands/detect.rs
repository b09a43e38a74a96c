//! Detect command implementation

use anyhow::{Context, Result};
use pagina_core::{RuleClassifier, TitlePatternDetector};
use std::fs;

/// Print the title pattern inferred from a text file
pub fn detect(input: &str, json: bool) -> Result<()> {
    let text =
        fs::read_to_string(input).with_context(|| format!("Failed to read input file: {}", input))?;
    let lines = RuleClassifier::default().strip_lines(&text.lines().collect::<Vec<_>>());

    let detector = TitlePatternDetector::new();
    let rule = detector
        .try_detect(&lines)
        .with_context(|| format!("Failed to detect titles in {}", input))?;
    let summary = rule.as_ref().map(|r| r.summary());

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    let Some(summary) = summary else {
        println!("No title pattern detected in {} lines", lines.len());
        return Ok(());
    };

    println!("Template:    {}", summary.template);
    println!("Numbers:     {}", summary.number_type);
    println!("Score:       {:.2}", summary.score);
    println!("Matches:     {}", summary.matched_lines);
    println!("Pattern:     {}", summary.pattern);

    for runner_up in detector.best_per_type(&lines).iter().skip(1) {
        tracing::debug!(
            template = %runner_up.template,
            number_type = %runner_up.number_type,
            score = runner_up.score,
            "Runner-up pattern"
        );
    }

    Ok(())
}
