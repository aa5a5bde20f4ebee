use crate::types::{AggregatorError, Category, Institution, ItemType, NormalizedItem, Result, Status};
use async_trait::async_trait;
use chrono::Utc;
use tracing::warn;

/// An upstream that yields normalized policy items.
#[async_trait]
pub trait PolicySource: Send + Sync {
    /// Short id, also the prefix of every item id this source emits
    fn source_id(&self) -> &str;

    /// Human-readable name for this source
    fn source_name(&self) -> &str;

    /// Institution that items from this source are attributed to
    fn institution(&self) -> Institution;

    /// Document kind reported on this source's diagnostic items
    fn item_type(&self) -> ItemType;

    /// Fetch and normalize the current items.
    async fn pull(&self) -> Result<Vec<NormalizedItem>>;

    /// Like [`pull`](Self::pull), but a failure becomes a single diagnostic
    /// item instead of an error.
    async fn collect(&self) -> Vec<NormalizedItem> {
        match self.pull().await {
            Ok(items) => items,
            Err(e) => {
                warn!("Source {} degraded: {}", self.source_id(), e);
                vec![diagnostic_item(self, &e)]
            }
        }
    }
}

/// Stand-in item telling the client that `source` could not be read.
pub fn diagnostic_item<S: PolicySource + ?Sized>(source: &S, error: &AggregatorError) -> NormalizedItem {
    let now = Utc::now();
    let title = format!("Quelle nicht verfügbar: {}", source.source_name());
    NormalizedItem {
        id: format!("{}-error", source.source_id()),
        official_title: title.clone(),
        simple_title: title,
        summary: error.reason(),
        institution: source.institution(),
        item_type: source.item_type(),
        category: Category::Other,
        status: Status::Stopped,
        date_published: now,
        last_updated: now,
        progress: 0.0,
        is_bookmarked: false,
        vote_result: None,
    }
}
