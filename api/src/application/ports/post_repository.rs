use async_trait::async_trait;

use crate::domain::feeds::post::{NewPost, Post};

#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Newest first by `published_at`.
    async fn list_posts(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Post>>;
    async fn count_posts(&self) -> anyhow::Result<i64>;
    /// Returns false when a post with the same checksum and link is already stored.
    async fn insert_if_absent(&self, post: &NewPost) -> anyhow::Result<bool>;
}
