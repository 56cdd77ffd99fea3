use async_trait::async_trait;
use sqlx::Row;

use crate::application::ports::post_repository::PostRepository;
use crate::domain::feeds::post::{NewPost, Post};
use crate::infrastructure::db::PgPool;

pub struct SqlxPostRepository {
    pub pool: PgPool,
}

impl SqlxPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostRepository for SqlxPostRepository {
    async fn list_posts(&self, limit: i64, offset: i64) -> anyhow::Result<Vec<Post>> {
        let rows = sqlx::query(
            r#"SELECT p.id, p.feed_id, f.blog, p.title, p.link, p.summary, p.thumbnail,
                      p.checksum, p.published_at
               FROM posts p JOIN feeds f ON f.id = p.feed_id
               ORDER BY p.published_at DESC, p.id
               LIMIT $1 OFFSET $2"#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows
            .into_iter()
            .map(|r| Post {
                id: r.get("id"),
                feed_id: r.get("feed_id"),
                blog: r.get("blog"),
                title: r.get("title"),
                link: r.get("link"),
                summary: r.try_get::<Option<String>, _>("summary").ok().flatten(),
                thumbnail: r.try_get::<Option<String>, _>("thumbnail").ok().flatten(),
                checksum: r.get("checksum"),
                published_at: r.get("published_at"),
            })
            .collect())
    }

    async fn count_posts(&self) -> anyhow::Result<i64> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(1) FROM posts")
            .fetch_one(&self.pool)
            .await?;
        Ok(n)
    }

    async fn insert_if_absent(&self, post: &NewPost) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"INSERT INTO posts (feed_id, title, link, summary, thumbnail, checksum, published_at)
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               ON CONFLICT (checksum, link) DO NOTHING"#,
        )
        .bind(post.feed_id)
        .bind(&post.title)
        .bind(&post.link)
        .bind(post.summary.as_deref())
        .bind(post.thumbnail.as_deref())
        .bind(&post.checksum)
        .bind(post.published_at)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected() > 0)
    }
}
