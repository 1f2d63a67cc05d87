//! Metrics collection for pipeline runs.

use serde::{Serialize, Serializer};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn serialize_duration<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_f64(duration.as_secs_f64())
}

/// Metrics for the pipeline.
#[derive(Debug)]
pub struct Metrics {
    /// Bytes of document text fetched
    pub bytes_fetched: AtomicU64,

    /// Chunks counted that contained at least one word
    pub chunks_counted: AtomicU64,

    /// Chunks that contained no words
    pub chunks_empty: AtomicU64,

    /// Total word occurrences tallied across all chunks
    pub words_counted: AtomicU64,

    /// Start time
    start_time: Instant,

    // Per-stage timing (in microseconds for precision)
    /// Time spent fetching the document (microseconds)
    pub fetch_us: AtomicU64,

    /// Time spent counting chunks (microseconds, summed across tasks)
    pub count_us: AtomicU64,

    /// Time spent merging per-chunk tallies (microseconds)
    pub merge_us: AtomicU64,

    /// Time spent rendering the chart (microseconds)
    pub render_us: AtomicU64,
}

impl Metrics {
    /// Create new metrics.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            bytes_fetched: AtomicU64::new(0),
            chunks_counted: AtomicU64::new(0),
            chunks_empty: AtomicU64::new(0),
            words_counted: AtomicU64::new(0),
            start_time: Instant::now(),
            fetch_us: AtomicU64::new(0),
            count_us: AtomicU64::new(0),
            merge_us: AtomicU64::new(0),
            render_us: AtomicU64::new(0),
        })
    }

    /// Record bytes fetched.
    pub fn add_bytes_fetched(&self, bytes: u64) {
        self.bytes_fetched.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Record a counted chunk.
    pub fn add_chunk_counted(&self) {
        self.chunks_counted.fetch_add(1, Ordering::Relaxed);
    }

    /// Record a chunk with no words.
    pub fn add_chunk_empty(&self) {
        self.chunks_empty.fetch_add(1, Ordering::Relaxed);
    }

    /// Record tallied word occurrences.
    pub fn add_words_counted(&self, count: u64) {
        self.words_counted.fetch_add(count, Ordering::Relaxed);
    }

    /// Record time spent fetching (in microseconds).
    pub fn add_fetch_time(&self, duration: Duration) {
        self.fetch_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    /// Record time spent counting (in microseconds).
    pub fn add_count_time(&self, duration: Duration) {
        self.count_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    /// Record time spent merging (in microseconds).
    pub fn add_merge_time(&self, duration: Duration) {
        self.merge_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    /// Record time spent rendering (in microseconds).
    pub fn add_render_time(&self, duration: Duration) {
        self.render_us
            .fetch_add(duration.as_micros() as u64, Ordering::Relaxed);
    }

    /// Get elapsed time since start.
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Get word occurrences tallied per second.
    pub fn words_per_second(&self) -> f64 {
        let words = self.words_counted.load(Ordering::Relaxed);
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            words as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Get a snapshot of current metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            bytes_fetched: self.bytes_fetched.load(Ordering::Relaxed),
            chunks_counted: self.chunks_counted.load(Ordering::Relaxed),
            chunks_empty: self.chunks_empty.load(Ordering::Relaxed),
            words_counted: self.words_counted.load(Ordering::Relaxed),
            elapsed: self.elapsed(),
            words_per_second: self.words_per_second(),
            fetch_secs: self.fetch_us.load(Ordering::Relaxed) as f64 / 1_000_000.0,
            count_secs: self.count_us.load(Ordering::Relaxed) as f64 / 1_000_000.0,
            merge_secs: self.merge_us.load(Ordering::Relaxed) as f64 / 1_000_000.0,
            render_secs: self.render_us.load(Ordering::Relaxed) as f64 / 1_000_000.0,
        }
    }
}

/// Snapshot of metrics at a point in time.
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub bytes_fetched: u64,
    pub chunks_counted: u64,
    pub chunks_empty: u64,
    pub words_counted: u64,
    #[serde(serialize_with = "serialize_duration")]
    pub elapsed: Duration,
    pub words_per_second: f64,
    /// Wall time spent fetching the document (seconds)
    pub fetch_secs: f64,
    /// CPU time spent counting (seconds, summed across tasks)
    pub count_secs: f64,
    /// Time spent merging per-chunk tallies (seconds)
    pub merge_secs: f64,
    /// Time spent rendering the chart (seconds)
    pub render_secs: f64,
}

impl MetricsSnapshot {
    /// Save metrics to a JSON file.
    pub fn save_to_file(&self, path: &str) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        tracing::info!("Metrics saved to {}", path);
        Ok(())
    }
}

impl std::fmt::Display for MetricsSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let total_stage_time = self.fetch_secs + self.count_secs + self.merge_secs + self.render_secs;
        let (fetch_pct, count_pct, merge_pct, render_pct) = if total_stage_time > 0.0 {
            (
                self.fetch_secs / total_stage_time * 100.0,
                self.count_secs / total_stage_time * 100.0,
                self.merge_secs / total_stage_time * 100.0,
                self.render_secs / total_stage_time * 100.0,
            )
        } else {
            (0.0, 0.0, 0.0, 0.0)
        };

        write!(
            f,
            "{:.1} KB fetched, {} chunks counted ({} empty), {} words in {:.2}s ({:.0} words/s) | \
             stage time: fetch {:.0}%, count {:.0}%, merge {:.0}%, render {:.0}%",
            self.bytes_fetched as f64 / 1024.0,
            self.chunks_counted,
            self.chunks_empty,
            self.words_counted,
            self.elapsed.as_secs_f64(),
            self.words_per_second,
            fetch_pct,
            count_pct,
            merge_pct,
            render_pct
        )
    }
}
