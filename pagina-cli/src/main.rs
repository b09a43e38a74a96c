//! Pagina CLI - Command-line interface for chapter detection and pagination

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::LimitArgs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Parse and validate jobs argument (must be at least 1)
fn parse_jobs(s: &str) -> Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("'{}' is not a valid number", s))?;
    if n < 1 {
        Err("jobs must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

#[derive(Parser)]
#[command(name = "pagina")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect the chapter title pattern of a text file
    Detect {
        /// Input file path
        input: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Split a text file into pages
    Paginate {
        /// Input file path
        input: String,

        #[command(flatten)]
        limits: LimitArgs,

        /// Skip title pattern detection and use the built-in title rules
        #[arg(long)]
        no_detect: bool,

        /// Title for the front matter page
        #[arg(long)]
        title: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Paginate every .txt file in a directory
    Batch {
        /// Input directory
        input_dir: String,

        /// Output directory
        #[arg(short, long)]
        output_dir: String,

        #[command(flatten)]
        limits: LimitArgs,

        /// Number of parallel jobs (must be at least 1)
        #[arg(short, long, default_value = "4", value_parser = parse_jobs)]
        jobs: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        "pagina_cli=debug,pagina_core=debug"
    } else {
        "pagina_cli=info"
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Detect { input, json } => commands::detect(&input, json),

        Commands::Paginate {
            input,
            limits,
            no_detect,
            title,
            json,
        } => commands::paginate(&input, &limits, !no_detect, title, json),

        Commands::Batch {
            input_dir,
            output_dir,
            limits,
            jobs,
        } => commands::batch(&input_dir, &output_dir, &limits, jobs),
    }
}
