use crate::types::{AggregatorError, ParsedEntry, ParsedFeed, Result};
use chrono::Utc;
use feed_rs::parser;
use std::collections::HashSet;
use tracing::{debug, info};

/// Turns an RSS/Atom document into [`ParsedEntry`] values.
///
/// feed-rs walks the whole document, so RSS 1.0 items that sit beside the
/// channel and RSS 2.0 items nested inside it both come out as entries.
pub struct FeedParser {
    seen_titles: HashSet<String>,
}

impl FeedParser {
    pub fn new() -> Self {
        Self {
            seen_titles: HashSet::new(),
        }
    }

    pub fn parse_feed(&mut self, content: &str) -> Result<ParsedFeed> {
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content.as_bytes())
            .map_err(|e| AggregatorError::Parse(format!("Failed to parse feed: {}", e)))?;

        let title = feed.title.map(|t| t.content);

        let entries: Vec<ParsedEntry> = feed
            .entries
            .into_iter()
            .filter_map(|entry| self.parse_entry(entry))
            .collect();

        info!("Parsed feed with {} entries", entries.len());

        Ok(ParsedFeed { title, entries })
    }

    fn parse_entry(&mut self, entry: feed_rs::model::Entry) -> Option<ParsedEntry> {
        let title = entry
            .title
            .map(|t| t.content.trim().to_string())
            .filter(|t| !t.is_empty());

        // Feed item ids are derived from the title, so a repeated title would
        // collide in the output.
        if let Some(ref title) = title {
            if !self.seen_titles.insert(title.clone()) {
                debug!("Skipping duplicate entry with title: {}", title);
                return None;
            }
        }

        let description = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body))
            .filter(|d| !d.trim().is_empty());

        let url = entry.links.first().map(|l| l.href.clone());

        let published_at = entry
            .published
            .or(entry.updated)
            .map(|dt| dt.with_timezone(&Utc));

        Some(ParsedEntry {
            title,
            description,
            url,
            published_at,
        })
    }

    /// Cheap sniff before handing the body to feed-rs: XML feeds (RSS,
    /// RDF, Atom) or a JSON Feed object.
    pub fn is_valid_feed_content(content: &str) -> bool {
        let trimmed = content.trim_start();
        let content_lower = content.to_lowercase();

        if trimmed.starts_with('{') {
            return content_lower.contains("\"version\"") && content_lower.contains("jsonfeed.org/version");
        }

        let has_rss_indicators = content_lower.contains("<rss")
            || content_lower.contains("<feed")
            || content_lower.contains("<rdf:rdf")
            || content_lower.contains("<channel");

        has_rss_indicators && trimmed.starts_with('<')
    }
}

impl Default for FeedParser {
    fn default() -> Self {
        Self::new()
    }
}
