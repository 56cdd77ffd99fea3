use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::feeds::feed::Feed;

#[derive(Debug, Clone)]
pub struct NewFeed {
    pub blog: String,
    pub name: String,
    pub email: String,
    pub rss_url: String,
}

#[async_trait]
pub trait FeedRepository: Send + Sync {
    /// Returns `None` when a feed with the same RSS URL already exists.
    async fn create_feed(&self, feed: &NewFeed) -> anyhow::Result<Option<Feed>>;
    async fn list_feeds(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Feed>>;
    async fn count_feeds(&self) -> anyhow::Result<i64>;
    async fn feed_exists(&self, id: Uuid) -> anyhow::Result<bool>;
}
