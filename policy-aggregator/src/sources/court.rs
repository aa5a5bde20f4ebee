use crate::config::FeedSourceConfig;
use crate::fetcher::Fetcher;
use crate::sources::rss_feed::{FeedProfile, RssFeedSource};
use crate::types::{Institution, ItemType, Status};

/// Federal Constitutional Court press releases. Announced decisions are
/// already in effect, hence `Effective`.
pub const PROFILE: FeedProfile = FeedProfile {
    source_id: "bverfg",
    source_name: "Bundesverfassungsgericht Pressemitteilungen",
    institution: Institution::Bundesverfassungsgericht,
    item_type: ItemType::Ruling,
    status: Status::Effective,
};

pub fn court_feed(config: FeedSourceConfig, fetcher: Fetcher) -> RssFeedSource {
    RssFeedSource::new(config, PROFILE, fetcher)
}
