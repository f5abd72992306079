//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building HTTP clients with the identifying user agent
//! - GET requests that race the crawl's cancellation token
//! - Classifying the response (HTML, HTTP error, wrong content type, network error)
//!
//! Callers outside this module only care whether HTML came back; the
//! classification exists for logging and statistics.

use crate::config::UserAgentConfig;
use reqwest::Client;
use std::future::Future;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use url::Url;

/// Result of a fetch operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Successfully fetched an HTML page
    Html(String),

    /// Server answered with a status of 400 or above
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Page is not HTML (Content-Type mismatch or missing)
    ContentMismatch {
        /// The Content-Type received, empty if absent
        content_type: String,
    },

    /// Network error (connection refused, timeout, body read failure, etc.)
    NetworkError {
        /// Error description
        error: String,
    },

    /// The crawl was cancelled before the fetch completed
    Cancelled,
}

impl FetchOutcome {
    /// Collapses the outcome to the page body, if there is one
    pub fn into_html(self) -> Option<String> {
        match self {
            Self::Html(body) => Some(body),
            _ => None,
        }
    }

    /// Short label used in logs and statistics
    pub fn label(&self) -> &'static str {
        match self {
            Self::Html(_) => "html",
            Self::HttpError { .. } => "http_error",
            Self::ContentMismatch { .. } => "content_mismatch",
            Self::NetworkError { .. } => "network_error",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Source of page bodies for the coordinator
///
/// The HTTP implementation is [`HttpFetcher`]; tests drive the coordinator
/// with in-memory implementations.
pub trait PageFetcher: Send + Sync + 'static {
    /// Fetches `url`, resolving to [`FetchOutcome::Cancelled`] promptly once
    /// `cancel` fires
    fn fetch_html(
        &self,
        url: &Url,
        cancel: &CancellationToken,
    ) -> impl Future<Output = FetchOutcome> + Send;
}

/// Fetches pages over HTTP with `reqwest`
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Builds a fetcher with a client configured from `config`
    pub fn new(config: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }
}

impl PageFetcher for HttpFetcher {
    async fn fetch_html(&self, url: &Url, cancel: &CancellationToken) -> FetchOutcome {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => FetchOutcome::Cancelled,
            outcome = fetch_url(&self.client, url) => outcome,
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// # Arguments
///
/// * `config` - The user agent configuration
///
/// # Returns
///
/// * `Ok(Client)` - Successfully built HTTP client
/// * `Err(reqwest::Error)` - Failed to build client
///
/// # Example
///
/// ```no_run
/// use site_ripple::config::UserAgentConfig;
/// use site_ripple::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &UserAgentConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.name.as_str())
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.timeout_secs.min(10)))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches a URL and classifies the response
///
/// # Request Flow
///
/// | Condition | Outcome |
/// |-----------|---------|
/// | Status >= 400 | HttpError |
/// | Content-Type without `text/html` | ContentMismatch |
/// | Connect/timeout/body error | NetworkError |
/// | Otherwise | Html |
///
/// Redirects are followed by the client; no retries are attempted.
pub async fn fetch_url(client: &Client, url: &Url) -> FetchOutcome {
    let response = match client.get(url.clone()).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                "Connection refused".to_string()
            } else {
                e.to_string()
            };
            return FetchOutcome::NetworkError { error };
        }
    };

    let status = response.status();
    if status.as_u16() >= 400 {
        return FetchOutcome::HttpError {
            status_code: status.as_u16(),
        };
    }

    let content_type = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();

    if !content_type.contains("text/html") {
        return FetchOutcome::ContentMismatch { content_type };
    }

    match response.text().await {
        Ok(body) => FetchOutcome::Html(body),
        Err(e) => FetchOutcome::NetworkError {
            error: e.to_string(),
        },
    }
}
