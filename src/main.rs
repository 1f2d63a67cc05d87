//! Word-Frequency CLI
//!
//! Fetch a text document over HTTP and chart its most frequent words.

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use wordfreq::{build_runtime, run_pipeline, Config};

#[derive(Parser)]
#[command(name = "wordfreq")]
#[command(about = "Chart the most frequent words of a web document", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// URL of the document to analyze
    #[arg(long, global = true)]
    url: Option<String>,

    /// Override the number of counting threads
    #[arg(long, global = true)]
    threads: Option<usize>,

    /// Override how many words to chart
    #[arg(long, global = true)]
    top_n: Option<usize>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch, count, and chart (default if no command specified)
    Run,

    /// Validate configuration
    Validate,

    /// Generate a sample configuration file
    GenerateConfig {
        /// Output path for configuration file
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let cli = Cli::parse();

    match &cli.command {
        None | Some(Commands::Run) => {
            run_command(&cli)?;
        }

        Some(Commands::Validate) => {
            validate_command(&cli)?;
        }

        Some(Commands::GenerateConfig { output }) => {
            generate_config_command(output)?;
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    // Apply overrides
    if let Some(url) = &cli.url {
        config.fetch.url = url.clone();
    }
    if let Some(threads) = cli.threads {
        config.processing.num_threads = threads;
    }
    if let Some(top_n) = cli.top_n {
        config.report.top_n = top_n;
    }

    Ok(config)
}

fn run_command(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    config.validate()?;

    let worker_threads = config.processing.worker_threads;
    let runtime = build_runtime(worker_threads)?;
    let stats = runtime.block_on(async { run_pipeline(config).await })?;

    if stats.fetch_failed {
        tracing::warn!("Run ended without a chart");
    }

    Ok(())
}

fn validate_command(cli: &Cli) -> Result<()> {
    let config = load_config(cli)?;
    config.validate()?;
    println!("Configuration is valid");
    Ok(())
}

fn generate_config_command(output: &PathBuf) -> Result<()> {
    // Generate a commented YAML config
    let yaml = r#"# wordfreq configuration

# === FETCH: The document to analyze ===
fetch:
  # URL of the text document
  url: "https://gutenberg.net.au/ebooks01/0100341.txt"

  # Request timeout in seconds
  timeout_secs: 30

# === PROCESSING: Performance tuning ===
processing:
  # Number of chunks to split the document into, and the cap on
  # concurrent counting tasks
  num_threads: 4

  # Tokio async worker threads (null = num CPUs)
  # worker_threads: 8

  # Log a metrics summary after the run
  enable_metrics: true

  # Optional path to save metrics JSON after the run completes
  # metrics_output_path: "metrics.json"

# === REPORT: Chart output ===
report:
  # How many of the most frequent words to chart
  top_n: 10

  # Print the chart as text bars on stdout
  terminal: true

  # Write the chart as an SVG file
  # svg_path: "top_words.svg"

  # SVG chart dimensions in pixels
  svg_width: 1000
  svg_height: 600
"#;

    std::fs::write(output, yaml)?;
    println!("Generated sample configuration at: {}", output.display());

    Ok(())
}
