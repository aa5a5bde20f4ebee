pub mod court;
pub mod dip;
pub mod government;
pub mod rss_feed;

pub use court::court_feed;
pub use dip::DipSource;
pub use government::government_feed;
pub use rss_feed::{FeedProfile, RssFeedSource};
