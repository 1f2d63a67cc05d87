//! HTTP retrieval of the document to analyze.

use crate::config::FetchConfig;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Failure to retrieve a document. Carries the URL and the underlying
/// cause; the pipeline treats any variant as fatal for the run.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL '{url}'")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported scheme '{scheme}' in '{url}'")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: StatusCode },

    #[error("failed to read response body from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// HTTP client wrapper for fetching text documents.
pub struct TextFetcher {
    http: Client,
}

impl TextFetcher {
    /// Create a fetcher with the configured user agent and timeout.
    pub fn new(config: &FetchConfig) -> anyhow::Result<Self> {
        let http = Client::builder()
            .user_agent(&config.user_agent)
            .gzip(true)
            .brotli(true)
            .deflate(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { http })
    }

    /// Fetch `url` and return the response body decoded as text.
    ///
    /// One round trip: no retry, no caching. Any transport failure or
    /// non-2xx status is an error.
    pub async fn fetch(&self, url_raw: &str) -> Result<String, FetchError> {
        let url = Url::parse(url_raw).map_err(|source| FetchError::InvalidUrl {
            url: url_raw.to_string(),
            source,
        })?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(FetchError::UnsupportedScheme {
                url: url_raw.to_string(),
                scheme: url.scheme().to_string(),
            });
        }

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: url_raw.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url_raw.to_string(),
                status,
            });
        }

        response.text().await.map_err(|source| FetchError::Body {
            url: url_raw.to_string(),
            source,
        })
    }
}
