use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::timestamp;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Institution {
    Bundestag,
    Bundesregierung,
    Bundesverfassungsgericht,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ItemType {
    Bill,
    Ordinance,
    Motion,
    Ruling,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Economy,
    Environment,
    Social,
    Digital,
    Justice,
    Defense,
    Health,
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Status {
    Draft,
    Committee,
    PassedBundestag,
    PassedBundesrat,
    Signed,
    Effective,
    Published,
    Stopped,
}

impl Status {
    /// Whether the matter has reached the end of the legislative lifecycle.
    pub fn is_final(self) -> bool {
        matches!(self, Status::Effective | Status::Published)
    }
}

/// Placeholder for a future vote breakdown. Always serialized as `null`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct VoteResult;

/// The one record shape every source is normalized into.
///
/// Field names and enum spellings are the contract with the client app,
/// so every field is always serialized; there are no skip attributes here.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedItem {
    pub id: String,
    pub official_title: String,
    pub simple_title: String,
    pub summary: String,
    pub institution: Institution,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    pub category: Category,
    pub status: Status,
    #[serde(with = "timestamp")]
    pub date_published: DateTime<Utc>,
    #[serde(with = "timestamp")]
    pub last_updated: DateTime<Utc>,
    pub progress: f64,
    pub is_bookmarked: bool,
    pub vote_result: Option<VoteResult>,
}

impl NormalizedItem {
    /// Items synthesized from a source failure rather than upstream data.
    pub fn is_diagnostic(&self) -> bool {
        self.status == Status::Stopped && self.progress == 0.0 && self.id.ends_with("-error")
    }
}

// Object style note:
// Items are built fresh for every request and handed straight to the
// serializer. Nothing here owns I/O or state; adapters live in the
// policy-aggregator crate and only depend on these definitions.
