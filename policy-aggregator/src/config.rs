use crate::types::FetchConfig;
use std::env;
use std::net::SocketAddr;
use tracing::warn;

pub const DEFAULT_DIP_API_URL: &str = "https://search.dip.bundestag.de/api/v1/vorgang";
pub const DEFAULT_BREG_FEED_URL: &str =
    "https://www.bundesregierung.de/service/rss/breg-de/1151242/feed.xml";
pub const DEFAULT_BVERFG_FEED_URL: &str =
    "https://www.bundesverfassungsgericht.de/SiteGlobals/Functions/RSSFeed/DE/RSSNewsfeed/RSS_Newsfeed.xml";
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

/// Everything the service reads from its environment, resolved once at
/// startup and passed down explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub dip: DipConfig,
    pub government: FeedSourceConfig,
    pub court: FeedSourceConfig,
    pub fetch: FetchConfig,
}

#[derive(Clone)]
pub struct DipConfig {
    pub base_url: String,
    pub api_key: Option<String>,
    pub page_size: u32,
    /// Append the raw upstream status to `officialTitle`.
    pub annotate_status: bool,
}

// Hand-written so the key never ends up in a log line.
impl std::fmt::Debug for DipConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DipConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("page_size", &self.page_size)
            .field("annotate_status", &self.annotate_status)
            .finish()
    }
}

impl Default for DipConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DIP_API_URL.to_string(),
            api_key: None,
            page_size: 15,
            annotate_status: false,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedSourceConfig {
    pub url: String,
    /// Keep only entries mentioning one of these (case-insensitive).
    /// Empty keeps everything.
    pub include_keywords: Vec<String>,
}

impl FeedSourceConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            include_keywords: Vec::new(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR
                .parse()
                .unwrap_or_else(|_| SocketAddr::from(([0, 0, 0, 0], 8080))),
            dip: DipConfig::default(),
            government: FeedSourceConfig::new(DEFAULT_BREG_FEED_URL),
            court: FeedSourceConfig::new(DEFAULT_BVERFG_FEED_URL),
            fetch: FetchConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read the process environment. Unset or unparsable values fall back to
    /// the defaults; a missing API key is not an error here.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(addr) = parsed_var::<SocketAddr>("POLICY_BIND") {
            config.bind_addr = addr;
        }

        if let Some(url) = non_empty_var("DIP_API_URL") {
            config.dip.base_url = url;
        }
        config.dip.api_key = non_empty_var("BUNDESTAG_API_KEY");
        if let Some(page_size) = parsed_var::<u32>("DIP_PAGE_SIZE") {
            config.dip.page_size = page_size;
        }
        if let Some(annotate) = parsed_var::<bool>("DIP_ANNOTATE_STATUS") {
            config.dip.annotate_status = annotate;
        }

        if let Some(url) = non_empty_var("BREG_FEED_URL") {
            config.government.url = url;
        }
        if let Some(url) = non_empty_var("BVERFG_FEED_URL") {
            config.court.url = url;
        }
        if let Some(keywords) = non_empty_var("BVERFG_FEED_KEYWORDS") {
            config.court.include_keywords = split_list(&keywords);
        }
        if let Some(keywords) = non_empty_var("BREG_FEED_KEYWORDS") {
            config.government.include_keywords = split_list(&keywords);
        }

        if let Some(timeout) = parsed_var::<u64>("FETCH_TIMEOUT_SECONDS") {
            config.fetch.timeout_seconds = timeout;
        }
        if let Some(user_agent) = non_empty_var("FETCH_USER_AGENT") {
            config.fetch.user_agent = user_agent;
        }
        if let Some(max_entries) = parsed_var::<usize>("FEED_MAX_ENTRIES") {
            config.fetch.max_entries = max_entries;
        }

        config
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parsed_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    let raw = non_empty_var(name)?;
    match raw.parse() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("Ignoring unparsable {}={:?}", name, raw);
            None
        }
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}
