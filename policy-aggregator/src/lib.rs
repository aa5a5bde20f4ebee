pub mod types;
pub mod config;
pub mod fetcher;
pub mod parser;
pub mod classify;
pub mod title;
pub mod utils;
pub mod traits;
pub mod sources;
pub mod aggregator;
pub mod server;

pub use types::*;
pub use config::{AppConfig, DipConfig, FeedSourceConfig};
pub use fetcher::Fetcher;
pub use parser::FeedParser;
pub use traits::{diagnostic_item, PolicySource};
pub use sources::{court_feed, government_feed, DipSource, FeedProfile, RssFeedSource};
pub use aggregator::{sort_newest_first, PolicyAggregator};
