//! Batch pagination command implementation

use super::LimitArgs;
use anyhow::{bail, Context, Result};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use pagina_core::{Document, PipelineOptions};
use rayon::prelude::*;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Suffix of the JSON report written for each input file
const REPORT_SUFFIX: &str = "pages.json";

/// Paginate every text file in a directory
pub fn batch(input_dir: &str, output_dir: &str, limits: &LimitArgs, jobs: usize) -> Result<()> {
    let input_path = Path::new(input_dir);
    let output_path = Path::new(output_dir);

    let options = PipelineOptions::new(limits.to_config()?);

    // Ensure output directory exists
    fs::create_dir_all(output_path)
        .with_context(|| format!("Failed to create output directory: {}", output_dir))?;

    // Find all plain-text files
    let files: Vec<_> = fs::read_dir(input_path)
        .with_context(|| format!("Failed to read input directory: {}", input_dir))?
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .map(|ext| ext.eq_ignore_ascii_case("txt"))
                .unwrap_or(false)
        })
        .collect();

    if files.is_empty() {
        println!("No text files found in {}", input_dir);
        return Ok(());
    }

    println!("Found {} files to paginate", files.len());

    // Set up progress tracking
    let multi_progress = MultiProgress::new();
    let overall_pb = multi_progress.add(ProgressBar::new(files.len() as u64));
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos:>7}/{len:7} {msg}")
            .context("Invalid progress bar template")?
            .progress_chars("##-"),
    );

    let success_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .context("Failed to start worker pool")?;

    // Process files in parallel
    pool.install(|| {
        files.par_iter().for_each(|file_path| {
            match process_file(file_path, output_path, &options) {
                Ok(pages) => {
                    success_count.fetch_add(1, Ordering::Relaxed);
                    overall_pb.set_message(format!("{} pages", pages));
                }
                Err(e) => {
                    error_count.fetch_add(1, Ordering::Relaxed);
                    tracing::error!("Failed to paginate {:?}: {:#}", file_path, e);
                }
            }

            overall_pb.inc(1);
        });
    });

    overall_pb.finish();

    let success = success_count.load(Ordering::Relaxed);
    let errors = error_count.load(Ordering::Relaxed);

    println!("\nBatch pagination complete:");
    println!("  Success: {}", success);
    println!("  Errors:  {}", errors);

    if errors > 0 {
        bail!("Batch pagination completed with {} errors", errors);
    }

    Ok(())
}

/// Paginate one file and write its report, returning the page count
fn process_file(input_path: &Path, output_dir: &Path, options: &PipelineOptions) -> Result<usize> {
    let file = File::open(input_path)?;
    let mut reader = BufReader::new(file);
    let doc = Document::paginate_reader(&mut reader, options)?;

    // Build output path
    let stem = input_path
        .file_stem()
        .and_then(|s| s.to_str())
        .context("Could not determine output filename from input")?;
    let output_file = output_dir.join(format!("{}.{}", stem, REPORT_SUFFIX));

    let writer = BufWriter::new(File::create(&output_file)?);
    serde_json::to_writer_pretty(writer, &doc)?;

    tracing::info!("Paginated {:?} -> {:?}", input_path, output_file);

    Ok(doc.page_count())
}
