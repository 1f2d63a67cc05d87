//! Work distribution for parallel chunk counting.
//!
//! One counting task per chunk, bounded concurrency, no shared mutable
//! state between tasks. The stream is drained to completion before the
//! fold begins; tallies merge in completion order, which does not affect
//! the final value.

use crate::chunk::ChunkSpan;
use crate::count::{count_words, WordCounts};
use crate::pipeline::Metrics;
use anyhow::Result;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Instant;

/// Configuration for the scheduler.
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// Number of counting tasks that may run at once
    pub concurrency: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self { concurrency: 4 }
    }
}

/// Scheduler for distributing chunk counting across blocking tasks.
pub struct Scheduler {
    /// The document the chunk spans index into
    document: Arc<str>,

    /// Metrics
    metrics: Arc<Metrics>,

    /// Configuration
    config: SchedulerConfig,
}

impl Scheduler {
    /// Create a new scheduler.
    pub fn new(document: Arc<str>, metrics: Arc<Metrics>, config: SchedulerConfig) -> Self {
        Self {
            document,
            metrics,
            config,
        }
    }

    /// Count every chunk and fold the tallies into one.
    pub async fn run(&self, spans: Vec<ChunkSpan>) -> Result<WordCounts> {
        let total_chunks = spans.len();
        let concurrency = self.config.concurrency.max(1);

        tracing::info!(
            "Scheduling {} chunks for counting ({} concurrent)",
            total_chunks,
            concurrency
        );

        let results: Vec<Result<WordCounts>> = stream::iter(spans)
            .map(|span| {
                let document = self.document.clone();
                let metrics = self.metrics.clone();
                async move {
                    tokio::task::spawn_blocking(move || {
                        let count_start = Instant::now();
                        let counts = count_words(span.slice(&document));
                        metrics.add_count_time(count_start.elapsed());
                        counts
                    })
                    .await
                    .map_err(|e| anyhow::anyhow!("Count task panicked: {}", e))
                }
            })
            .buffer_unordered(concurrency)
            .collect()
            .await;

        let merge_start = Instant::now();
        let mut totals = WordCounts::new();
        for result in results {
            let counts = result?;
            if counts.is_empty() {
                self.metrics.add_chunk_empty();
            } else {
                self.metrics.add_chunk_counted();
            }
            self.metrics.add_words_counted(counts.total());
            totals.absorb(counts);
        }
        self.metrics.add_merge_time(merge_start.elapsed());

        Ok(totals)
    }
}
