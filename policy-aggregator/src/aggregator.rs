use crate::config::AppConfig;
use crate::fetcher::Fetcher;
use crate::sources::{court_feed, government_feed, DipSource};
use crate::traits::PolicySource;
use crate::types::{AggregatorError, NormalizedItem, Result};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{error, info};

/// Runs every configured source and merges their items into one list.
pub struct PolicyAggregator {
    sources: Vec<Arc<dyn PolicySource>>,
}

impl PolicyAggregator {
    pub fn new(sources: Vec<Arc<dyn PolicySource>>) -> Self {
        Self { sources }
    }

    /// The standard three sources: DIP, government press, court press.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let fetcher = Fetcher::new(config.fetch.clone())?;

        let sources: Vec<Arc<dyn PolicySource>> = vec![
            Arc::new(DipSource::new(config.dip.clone(), fetcher.clone())),
            Arc::new(government_feed(config.government.clone(), fetcher.clone())),
            Arc::new(court_feed(config.court.clone(), fetcher)),
        ];

        Ok(Self::new(sources))
    }

    pub fn sources(&self) -> &[Arc<dyn PolicySource>] {
        &self.sources
    }

    /// Collect from all sources concurrently and sort newest first.
    ///
    /// Source failures arrive here as diagnostic items. Only a source task
    /// that dies outright makes this return an error.
    pub async fn aggregate(&self) -> Result<Vec<NormalizedItem>> {
        let handles: Vec<_> = self
            .sources
            .iter()
            .map(|source| {
                let source = Arc::clone(source);
                tokio::spawn(async move { source.collect().await })
            })
            .collect();

        let mut items = Vec::new();
        for (source, joined) in self.sources.iter().zip(join_all(handles).await) {
            match joined {
                Ok(source_items) => {
                    info!("{} contributed {} items", source.source_name(), source_items.len());
                    items.extend(source_items);
                }
                Err(e) => {
                    error!("Source task {} failed: {}", source.source_id(), e);
                    return Err(AggregatorError::Internal(format!(
                        "source {} aborted: {}",
                        source.source_id(),
                        e
                    )));
                }
            }
        }

        sort_newest_first(&mut items);
        Ok(items)
    }
}

/// Stable sort on `datePublished`, newest first. Ties keep source order.
pub fn sort_newest_first(items: &mut [NormalizedItem]) {
    items.sort_by(|a, b| b.date_published.cmp(&a.date_published));
}
