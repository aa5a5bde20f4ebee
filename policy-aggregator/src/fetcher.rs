use crate::types::{AggregatorError, FetchConfig, FetchResult, Result};
use chrono::Utc;
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, RequestBuilder};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use url::Url;

/// Shared outbound HTTP client. One per process; cheap to clone.
#[derive(Clone)]
pub struct Fetcher {
    client: Client,
    config: FetchConfig,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// GET an RSS/Atom document.
    pub async fn fetch_feed(&self, url: &str) -> Result<FetchResult> {
        debug!("Fetching feed: {}", url);
        let request = self
            .client
            .get(url)
            .header(ACCEPT, "application/rss+xml, application/atom+xml, application/xml;q=0.9, */*;q=0.8");
        self.send(request, url).await
    }

    /// GET a JSON document authenticated with a DIP style `ApiKey` header.
    pub async fn fetch_json_with_key(&self, url: &Url, api_key: &str) -> Result<FetchResult> {
        // The query string can be long; the host is enough for the log line.
        debug!("Fetching JSON from {}", url.host_str().unwrap_or("unknown host"));
        let request = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/json")
            .header(AUTHORIZATION, format!("ApiKey {}", api_key));
        self.send(request, url.as_str()).await
    }

    async fn send(&self, request: RequestBuilder, url: &str) -> Result<FetchResult> {
        let start_time = Instant::now();
        let fetch_time = Utc::now();

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            warn!(
                "HTTP {}: {} for {}",
                status,
                status.canonical_reason().unwrap_or("Unknown"),
                url
            );
            return Err(AggregatorError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let max_bytes = self.config.max_feed_size_mb.saturating_mul(1024 * 1024);
        if let Some(content_length) = response.content_length() {
            if content_length > max_bytes as u64 {
                return Err(too_large(content_length as usize));
            }
        }

        // Chunked responses carry no Content-Length.
        let content = response.text().await?;
        if content.len() > max_bytes {
            return Err(too_large(content.len()));
        }

        let response_time_ms = start_time.elapsed().as_millis() as u64;
        info!("Fetched {} ({} bytes, {}ms)", url, content.len(), response_time_ms);

        Ok(FetchResult {
            url: url.to_string(),
            http_status: status.as_u16(),
            fetch_time,
            response_time_ms,
            content,
        })
    }
}

fn too_large(bytes: usize) -> AggregatorError {
    AggregatorError::FeedTooLarge {
        size_mb: bytes.div_ceil(1024 * 1024),
    }
}
