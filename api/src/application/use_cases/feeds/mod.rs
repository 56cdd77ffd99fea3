pub mod list_feeds;
pub mod register_feed;
pub mod render_rss;
