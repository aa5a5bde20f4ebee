use crate::config::FeedSourceConfig;
use crate::fetcher::Fetcher;
use crate::sources::rss_feed::{FeedProfile, RssFeedSource};
use crate::types::{Institution, ItemType, Status};

/// Federal Government press releases. Typed `ordinance` because they
/// announce executive decisions already in force, not bills in progress.
pub const PROFILE: FeedProfile = FeedProfile {
    source_id: "breg",
    source_name: "Bundesregierung Pressemitteilungen",
    institution: Institution::Bundesregierung,
    item_type: ItemType::Ordinance,
    status: Status::Published,
};

pub fn government_feed(config: FeedSourceConfig, fetcher: Fetcher) -> RssFeedSource {
    RssFeedSource::new(config, PROFILE, fetcher)
}
