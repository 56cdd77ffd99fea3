use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::feed_repository::{FeedRepository, NewFeed};
use crate::domain::feeds::feed::Feed;
use crate::infrastructure::db::PgPool;

pub struct SqlxFeedRepository {
    pub pool: PgPool,
}

impl SqlxFeedRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_feed(r: &PgRow) -> Feed {
    Feed {
        id: r.get("id"),
        blog: r.get("blog"),
        name: r.get("name"),
        email: r.get("email"),
        rss_url: r.get("rss_url"),
        created_at: r.get("created_at"),
    }
}

#[async_trait]
impl FeedRepository for SqlxFeedRepository {
    async fn create_feed(&self, feed: &NewFeed) -> anyhow::Result<Option<Feed>> {
        let row = sqlx::query(
            r#"INSERT INTO feeds (blog, name, email, rss_url) VALUES ($1, $2, $3, $4)
               ON CONFLICT (rss_url) DO NOTHING
               RETURNING id, blog, name, email, rss_url, created_at"#,
        )
        .bind(&feed.blog)
        .bind(&feed.name)
        .bind(&feed.email)
        .bind(&feed.rss_url)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.as_ref().map(map_feed))
    }

    async fn list_feeds(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Feed>> {
        let rows = sqlx::query(
            r#"SELECT id, blog, name, email, rss_url, created_at FROM feeds
               ORDER BY created_at DESC, id LIMIT $1 OFFSET $2"#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.iter().map(map_feed).collect())
    }

    async fn count_feeds(&self) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM feeds")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    async fn feed_exists(&self, id: Uuid) -> anyhow::Result<bool> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM feeds WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }
}
