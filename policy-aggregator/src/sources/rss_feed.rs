use crate::classify::category;
use crate::config::FeedSourceConfig;
use crate::fetcher::Fetcher;
use crate::parser::FeedParser;
use crate::title;
use crate::traits::PolicySource;
use crate::types::{
    AggregatorError, Institution, ItemType, NormalizedItem, ParsedEntry, Result, Status,
    FALLBACK_SUMMARY, FALLBACK_TITLE,
};
use crate::utils::{ids, text};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

/// The fixed attributes every item of a feed gets.
///
/// Press feeds only announce finished business, so status and type are a
/// property of the feed rather than of the entry.
#[derive(Debug, Clone)]
pub struct FeedProfile {
    pub source_id: &'static str,
    pub source_name: &'static str,
    pub institution: Institution,
    pub item_type: ItemType,
    pub status: Status,
}

/// Generic RSS/Atom press feed.
pub struct RssFeedSource {
    config: FeedSourceConfig,
    profile: FeedProfile,
    fetcher: Fetcher,
}

impl RssFeedSource {
    pub fn new(config: FeedSourceConfig, profile: FeedProfile, fetcher: Fetcher) -> Self {
        Self {
            config,
            profile,
            fetcher,
        }
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Parse a fetched document into normalized items.
    pub fn items_from_document(&self, content: &str, fetch_time: DateTime<Utc>) -> Result<Vec<NormalizedItem>> {
        if !FeedParser::is_valid_feed_content(content) {
            return Err(AggregatorError::Parse("response is not an RSS, Atom or JSON feed".to_string()));
        }

        let mut parser = FeedParser::new();
        let parsed_feed = parser.parse_feed(content)?;
        debug!(
            "Feed {:?} delivered {} entries",
            parsed_feed.title,
            parsed_feed.entries.len()
        );

        let max_entries = self.fetcher.config().max_entries;
        let items = parsed_feed
            .entries
            .iter()
            .filter(|entry| self.matches_filter(entry))
            .take(max_entries)
            .map(|entry| self.normalize(entry, fetch_time))
            .collect();

        Ok(items)
    }

    fn matches_filter(&self, entry: &ParsedEntry) -> bool {
        if self.config.include_keywords.is_empty() {
            return true;
        }
        let haystack = format!(
            "{} {}",
            entry.title.as_deref().unwrap_or(""),
            entry.description.as_deref().unwrap_or("")
        )
        .to_lowercase();
        self.config
            .include_keywords
            .iter()
            .any(|k| haystack.contains(&k.to_lowercase()))
    }

    pub fn normalize(&self, entry: &ParsedEntry, fetch_time: DateTime<Utc>) -> NormalizedItem {
        let official_title = entry.title.clone().unwrap_or_else(|| FALLBACK_TITLE.to_string());

        let description = entry
            .description
            .as_deref()
            .map(text::strip_markup)
            .filter(|d| !d.is_empty());

        let category = category::from_text(&format!(
            "{} {}",
            official_title,
            description.as_deref().unwrap_or("")
        ));

        let summary = match description {
            Some(d) => text::truncate_chars(&d, self.fetcher.config().description_chars),
            None => FALLBACK_SUMMARY.to_string(),
        };

        let date_published = entry.published_at.unwrap_or(fetch_time);

        // Untitled entries would all hash alike; their link is the better key.
        let id_key = entry
            .title
            .as_deref()
            .or(entry.url.as_deref())
            .unwrap_or(FALLBACK_TITLE);

        NormalizedItem {
            id: ids::from_title(self.profile.source_id, id_key),
            simple_title: title::simplify(&official_title),
            official_title,
            summary,
            institution: self.profile.institution,
            item_type: self.profile.item_type,
            category,
            status: self.profile.status,
            date_published,
            last_updated: fetch_time,
            progress: 1.0,
            is_bookmarked: false,
            vote_result: None,
        }
    }
}

#[async_trait]
impl PolicySource for RssFeedSource {
    fn source_id(&self) -> &str {
        self.profile.source_id
    }

    fn source_name(&self) -> &str {
        self.profile.source_name
    }

    fn institution(&self) -> Institution {
        self.profile.institution
    }

    fn item_type(&self) -> ItemType {
        self.profile.item_type
    }

    async fn pull(&self) -> Result<Vec<NormalizedItem>> {
        info!("Pulling feed {}: {}", self.source_name(), self.url());

        let fetch_result = self.fetcher.fetch_feed(self.url()).await?;
        let items = self.items_from_document(&fetch_result.content, fetch_result.fetch_time)?;

        info!("Normalized {} items from {}", items.len(), self.source_name());
        Ok(items)
    }
}
