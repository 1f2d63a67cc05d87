//! Configuration for the word-frequency pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fetch configuration
    pub fetch: FetchConfig,

    /// Processing configuration
    #[serde(default)]
    pub processing: ProcessingConfig,

    /// Report configuration
    #[serde(default)]
    pub report: ReportConfig,
}

/// Document fetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// URL of the text document to analyze
    #[serde(default)]
    pub url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with the request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

/// Processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    /// Number of chunks to split the document into, and the cap on
    /// concurrent counting tasks. Splitting can produce more chunks than
    /// this when the division is uneven; surplus chunks queue.
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,

    /// Number of Tokio worker threads (null = num CPUs)
    #[serde(default)]
    pub worker_threads: Option<usize>,

    /// Log a metrics summary after the run
    #[serde(default = "default_true")]
    pub enable_metrics: bool,

    /// Optional path to save metrics JSON after the run completes
    #[serde(default)]
    pub metrics_output_path: Option<String>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            num_threads: default_num_threads(),
            worker_threads: None,
            enable_metrics: true,
            metrics_output_path: None,
        }
    }
}

/// Report configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// How many of the most frequent words to chart
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Print the chart as text bars on stdout
    #[serde(default = "default_true")]
    pub terminal: bool,

    /// Optional path to write the chart as an SVG file
    #[serde(default)]
    pub svg_path: Option<String>,

    /// SVG chart width in pixels
    #[serde(default = "default_svg_width")]
    pub svg_width: u32,

    /// SVG chart height in pixels
    #[serde(default = "default_svg_height")]
    pub svg_height: u32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            terminal: true,
            svg_path: None,
            svg_width: default_svg_width(),
            svg_height: default_svg_height(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            processing: ProcessingConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML or JSON file.
    /// Format is auto-detected from file extension (.yaml, .yml, or .json).
    pub fn from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let config: Config = match ext {
            "yaml" | "yml" => serde_yaml::from_str(&contents)?,
            "json" => serde_json::from_str(&contents)?,
            _ => {
                // Try YAML first (it's a superset of JSON)
                serde_yaml::from_str(&contents)?
            }
        };
        Ok(config)
    }

    /// Load configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        let config: Config = serde_yaml::from_str(yaml)?;
        Ok(config)
    }

    /// Serialize configuration to YAML.
    pub fn to_yaml(&self) -> anyhow::Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.fetch.url.is_empty() {
            anyhow::bail!("A document URL is required (set fetch.url or pass --url)");
        }
        if self.fetch.timeout_secs == 0 {
            anyhow::bail!("Fetch timeout must be > 0");
        }
        if self.processing.num_threads == 0 {
            anyhow::bail!("num_threads must be > 0");
        }
        if self.report.top_n == 0 {
            anyhow::bail!("top_n must be > 0");
        }
        if !self.report.terminal && self.report.svg_path.is_none() {
            anyhow::bail!("Must enable at least one report output (terminal or svg_path)");
        }
        if self.report.svg_width == 0 || self.report.svg_height == 0 {
            anyhow::bail!("Chart dimensions must be > 0");
        }
        Ok(())
    }
}

// Default value functions for serde
fn default_timeout_secs() -> u64 { 30 }
fn default_user_agent() -> String { concat!("wordfreq/", env!("CARGO_PKG_VERSION")).to_string() }
fn default_num_threads() -> usize { 4 }
fn default_true() -> bool { true }
fn default_top_n() -> usize { 10 }
fn default_svg_width() -> u32 { 1000 }
fn default_svg_height() -> u32 { 600 }
