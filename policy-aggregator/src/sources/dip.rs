use crate::classify::{category, item_type, status};
use crate::config::DipConfig;
use crate::fetcher::Fetcher;
use crate::title;
use crate::traits::PolicySource;
use crate::types::{
    AggregatorError, DipResponse, DipVorgang, Institution, ItemType, NormalizedItem, Result,
    FALLBACK_SUMMARY, FALLBACK_TITLE,
};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use interfaces::timestamp;
use tracing::{debug, info};
use url::Url;

/// Bundestag DIP `vorgang` search, restricted to legislation.
pub struct DipSource {
    config: DipConfig,
    fetcher: Fetcher,
}

impl DipSource {
    pub fn new(config: DipConfig, fetcher: Fetcher) -> Self {
        Self { config, fetcher }
    }

    pub fn query_url(&self) -> Result<Url> {
        let limit = self.config.page_size.to_string();
        let url = Url::parse_with_params(
            &self.config.base_url,
            &[
                ("f.vorgangstyp", "Gesetzgebung"),
                ("format", "json"),
                ("limit", limit.as_str()),
                ("sort", "-aktualisiert"),
            ],
        )?;
        Ok(url)
    }

    pub fn normalize(&self, vorgang: &DipVorgang, fetch_time: DateTime<Utc>) -> NormalizedItem {
        let raw_status = status::raw_status(vorgang);
        let item_status = status::classify(raw_status);

        let titel = vorgang
            .titel
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(FALLBACK_TITLE);

        let official_title = if self.config.annotate_status {
            format!("{} [{}]", titel, raw_status)
        } else {
            titel.to_string()
        };

        let summary = vorgang
            .abstract_text
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(FALLBACK_SUMMARY)
            .to_string();

        let date_published = vorgang
            .datum
            .as_deref()
            .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
            .map(timestamp::at_default_time)
            .unwrap_or(fetch_time);

        let last_updated = vorgang
            .aktualisiert
            .as_deref()
            .and_then(|d| DateTime::parse_from_rfc3339(d.trim()).ok())
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(fetch_time);

        NormalizedItem {
            id: format!("{}-{}", self.source_id(), vorgang.id.as_deref().unwrap_or("unknown")),
            simple_title: title::simplify(titel),
            official_title,
            summary,
            institution: Institution::Bundestag,
            item_type: item_type::classify(vorgang.vorgangstyp.as_deref().unwrap_or("")),
            category: category::from_subjects(vorgang.sachgebiet.as_slice()),
            status: item_status,
            date_published,
            last_updated,
            progress: if item_status.is_final() { 1.0 } else { 0.5 },
            is_bookmarked: false,
            vote_result: None,
        }
    }
}

#[async_trait]
impl PolicySource for DipSource {
    fn source_id(&self) -> &str {
        "dip"
    }

    fn source_name(&self) -> &str {
        "Bundestag DIP"
    }

    fn institution(&self) -> Institution {
        Institution::Bundestag
    }

    fn item_type(&self) -> ItemType {
        ItemType::Bill
    }

    async fn pull(&self) -> Result<Vec<NormalizedItem>> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AggregatorError::MissingCredential {
                source_name: self.source_name().to_string(),
            })?;

        let url = self.query_url()?;
        let fetch_result = self.fetcher.fetch_json_with_key(&url, api_key).await?;

        let response: DipResponse = serde_json::from_str(&fetch_result.content)?;
        debug!(
            "DIP returned {} documents (numFound: {:?})",
            response.documents.len(),
            response.num_found
        );

        let items: Vec<NormalizedItem> = response
            .documents
            .iter()
            .map(|vorgang| self.normalize(vorgang, fetch_result.fetch_time))
            .collect();

        info!("Normalized {} items from {}", items.len(), self.source_name());
        Ok(items)
    }
}
