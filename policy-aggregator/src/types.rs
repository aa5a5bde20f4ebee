use chrono::{DateTime, Utc};
use serde::Deserialize;

pub use interfaces::defs::{Category, Institution, ItemType, NormalizedItem, Status, VoteResult};

/// A desktop browser identity. Both press servers answer unidentified
/// clients with 403.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";

/// Summary text used whenever an upstream record carries no description.
pub const FALLBACK_SUMMARY: &str = "Keine Zusammenfassung verfügbar.";

/// Title used whenever an upstream record carries no title.
pub const FALLBACK_TITLE: &str = "Ohne Titel";

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_feed_size_mb: usize,
    pub max_redirects: usize,
    /// Feed entries kept per source, in feed order.
    pub max_entries: usize,
    /// Character budget for a feed entry's description.
    pub description_chars: usize,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: BROWSER_USER_AGENT.to_string(),
            timeout_seconds: 15,
            max_feed_size_mb: 10,
            max_redirects: 5,
            max_entries: 10,
            description_chars: 300,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FetchResult {
    pub url: String,
    pub http_status: u16,
    pub fetch_time: DateTime<Utc>,
    pub response_time_ms: u64,
    pub content: String,
}

#[derive(Debug)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub entries: Vec<ParsedEntry>,
}

#[derive(Debug, Clone)]
pub struct ParsedEntry {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
}

/// Response envelope of the DIP `vorgang` endpoint.
///
/// Only the fields we read are modelled; everything is optional because the
/// API omits keys instead of sending nulls.
#[derive(Debug, Default, Deserialize)]
pub struct DipResponse {
    #[serde(default)]
    pub documents: Vec<DipVorgang>,
    #[serde(rename = "numFound")]
    pub num_found: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct DipVorgang {
    pub id: Option<String>,
    pub titel: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub vorgangstyp: Option<String>,
    #[serde(default)]
    pub sachgebiet: Vec<String>,
    pub beratungsstand: Option<String>,
    pub aktueller_stand: Option<String>,
    pub vorgangsstatus: Option<String>,
    pub datum: Option<String>,
    pub aktualisiert: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AggregatorError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("No API key configured for {source_name}")]
    MissingCredential { source_name: String },

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Feed size exceeds limit: {size_mb}MB")]
    FeedTooLarge { size_mb: usize },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AggregatorError {
    /// Human-readable reason carried into a diagnostic item's summary.
    pub fn reason(&self) -> String {
        match self {
            AggregatorError::Http(e) if e.is_timeout() => "Zeitüberschreitung beim Abruf".to_string(),
            AggregatorError::Http(e) if e.is_connect() => "Verbindung fehlgeschlagen".to_string(),
            AggregatorError::Status { status: status @ (401 | 403), .. } => {
                format!("Zugriff verweigert (HTTP {})", status)
            }
            AggregatorError::Status { status, .. } => format!("Server antwortete mit HTTP {}", status),
            AggregatorError::MissingCredential { .. } => "API-Schlüssel fehlt auf dem Server".to_string(),
            AggregatorError::Parse(msg) => format!("Antwort nicht lesbar: {}", msg),
            AggregatorError::Serialization(e) => format!("Antwort nicht lesbar: {}", e),
            other => other.to_string(),
        }
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            AggregatorError::Status { status, .. } => Some(*status),
            AggregatorError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AggregatorError>;
