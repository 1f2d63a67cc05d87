//! Word-Frequency Pipeline
//!
//! Fetches a text document over HTTP, counts word frequencies across
//! contiguous chunks in parallel, merges the per-chunk tallies, and
//! renders the most frequent words as a bar chart.
//!
//! # Architecture
//!
//! The pipeline consists of:
//!
//! - **Fetch**: one HTTP GET per run, body decoded as text
//! - **Chunk**: fixed-stride split of the document into contiguous spans
//! - **Count**: per-chunk word tallies with bounded concurrency
//! - **Report**: top-N selection rendered through swappable adapters
//!
//! # Usage
//!
//! ```no_run
//! use wordfreq::{run_pipeline, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut config = Config::default();
//!     config.fetch.url = "https://example.com/book.txt".to_string();
//!     run_pipeline(config).await?;
//!     Ok(())
//! }
//! ```

pub mod chunk;
pub mod config;
pub mod count;
pub mod fetch;
pub mod pipeline;
pub mod report;

#[cfg(test)]
mod integration_tests;

pub use chunk::{split_document, ChunkSpan};
pub use config::Config;
pub use count::{count_words, WordCounts};
pub use fetch::{FetchError, TextFetcher};
pub use pipeline::{Metrics, Scheduler, SchedulerConfig};
pub use report::{top_words, ChartRenderer, ChartSpec, SvgRenderer, TerminalRenderer};

use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;

/// Statistics from one pipeline run.
#[derive(Debug, Default)]
pub struct PipelineStats {
    /// The fetch failed and the run ended before chunking
    pub fetch_failed: bool,

    /// Characters in the fetched document
    pub document_chars: usize,

    /// Chunks the document was split into
    pub chunks: usize,

    /// Total word occurrences tallied
    pub total_words: u64,

    /// Distinct words tallied
    pub distinct_words: usize,

    /// A chart was rendered
    pub rendered: bool,
}

impl std::fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Chars: {}, Chunks: {}, Words: {} ({} distinct), Chart: {}",
            self.document_chars,
            self.chunks,
            self.total_words,
            self.distinct_words,
            if self.rendered { "yes" } else { "no" }
        )
    }
}

/// Run the full analysis pipeline with the given configuration.
///
/// The fetch is the only fallible stage: on failure the error is logged
/// and the run ends early without a chart. Everything downstream operates
/// on well-formed strings and cannot fail, apart from a counting task
/// panicking or a renderer being unable to write its output.
pub async fn run_pipeline(config: Config) -> Result<PipelineStats> {
    config.validate()?;

    let metrics = Metrics::new();
    let mut stats = PipelineStats::default();

    tracing::info!("Fetching {}", config.fetch.url);
    let fetcher = TextFetcher::new(&config.fetch)?;
    let fetch_start = Instant::now();
    let document = match fetcher.fetch(&config.fetch.url).await {
        Ok(text) => text,
        Err(error) => {
            tracing::error!("Error fetching content from {}: {}", config.fetch.url, error);
            stats.fetch_failed = true;
            return Ok(stats);
        }
    };
    metrics.add_fetch_time(fetch_start.elapsed());
    metrics.add_bytes_fetched(document.len() as u64);

    if document.is_empty() {
        tracing::error!("Failed to load any text from {}", config.fetch.url);
        return Ok(stats);
    }

    stats.document_chars = document.chars().count();
    let spans = split_document(&document, config.processing.num_threads);
    stats.chunks = spans.len();
    tracing::info!(
        "Split {} chars into {} chunks",
        stats.document_chars,
        stats.chunks
    );

    let document: Arc<str> = document.into();
    let scheduler = Scheduler::new(
        document,
        metrics.clone(),
        SchedulerConfig {
            concurrency: config.processing.num_threads,
        },
    );
    let totals = scheduler.run(spans).await?;
    stats.total_words = totals.total();
    stats.distinct_words = totals.len();

    let Some(chart) = ChartSpec::top_words(&totals, config.report.top_n) else {
        tracing::warn!("No words found in document; skipping chart");
        log_metrics(&config, &metrics);
        return Ok(stats);
    };

    let render_start = Instant::now();
    if config.report.terminal {
        TerminalRenderer::default().render(&chart)?;
    }
    if let Some(path) = &config.report.svg_path {
        SvgRenderer::new(path, config.report.svg_width, config.report.svg_height)
            .render(&chart)?;
    }
    metrics.add_render_time(render_start.elapsed());
    stats.rendered = true;

    log_metrics(&config, &metrics);
    tracing::info!("Pipeline complete: {}", stats);

    Ok(stats)
}

fn log_metrics(config: &Config, metrics: &Metrics) {
    if !config.processing.enable_metrics {
        return;
    }
    let snapshot = metrics.snapshot();
    tracing::info!("{}", snapshot);
    if let Some(path) = &config.processing.metrics_output_path {
        if let Err(e) = snapshot.save_to_file(path) {
            tracing::warn!("Failed to save metrics to {}: {}", path, e);
        }
    }
}

/// Build a Tokio runtime with the specified configuration.
pub fn build_runtime(worker_threads: Option<usize>) -> Result<tokio::runtime::Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();

    if let Some(threads) = worker_threads {
        builder.worker_threads(threads);
    }

    builder.enable_all();

    Ok(builder.build()?)
}
