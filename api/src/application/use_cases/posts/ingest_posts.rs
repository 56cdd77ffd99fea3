use uuid::Uuid;

use crate::application::dto::posts::{IngestPostInput, IngestSummaryDto};
use crate::application::ports::feed_repository::FeedRepository;
use crate::application::ports::post_repository::PostRepository;
use crate::application::services::crc32::checksum;
use crate::domain::feeds::post::NewPost;

pub struct IngestPosts<'a, F, P>
where
    F: FeedRepository + ?Sized,
    P: PostRepository + ?Sized,
{
    pub feeds: &'a F,
    pub posts: &'a P,
}

impl<'a, F, P> IngestPosts<'a, F, P>
where
    F: FeedRepository + ?Sized,
    P: PostRepository + ?Sized,
{
    /// `Ok(None)` when the feed does not exist.
    pub async fn execute(
        &self,
        feed_id: Uuid,
        items: Vec<IngestPostInput>,
    ) -> anyhow::Result<Option<IngestSummaryDto>> {
        if !self.feeds.feed_exists(feed_id).await? {
            return Ok(None);
        }
        let mut summary = IngestSummaryDto::default();
        for item in items {
            let link = item.link.trim().to_string();
            let post = NewPost {
                feed_id,
                title: item.title.trim().to_string(),
                checksum: checksum(&link),
                link,
                summary: item.summary,
                thumbnail: item.thumbnail,
                published_at: item.published_at,
            };
            if self.posts.insert_if_absent(&post).await? {
                summary.inserted += 1;
            } else {
                summary.skipped += 1;
            }
        }
        tracing::info!(
            feed_id = %feed_id,
            inserted = summary.inserted,
            skipped = summary.skipped,
            "posts_ingested"
        );
        Ok(Some(summary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::feed_repository::NewFeed;
    use crate::application::testing::{InMemoryFeeds, InMemoryPosts};
    use chrono::Utc;

    fn item(link: &str) -> IngestPostInput {
        IngestPostInput {
            title: "Hello".into(),
            link: link.into(),
            summary: None,
            thumbnail: None,
            published_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn skips_posts_with_known_checksum() {
        let feeds = InMemoryFeeds::default();
        let posts = InMemoryPosts::default();
        let feed = feeds
            .create_feed(&NewFeed {
                blog: "b".into(),
                name: "n".into(),
                email: "e@x.dev".into(),
                rss_url: "https://x.dev/rss".into(),
            })
            .await
            .unwrap()
            .unwrap();
        let uc = IngestPosts {
            feeds: &feeds,
            posts: &posts,
        };
        let first = uc
            .execute(feed.id, vec![item("https://x.dev/1"), item("https://x.dev/2")])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(first, IngestSummaryDto { inserted: 2, skipped: 0 });
        let again = uc
            .execute(feed.id, vec![item(" https://x.dev/1 "), item("https://x.dev/3")])
            .await
            .unwrap()
            .unwrap();
        assert_eq!(again, IngestSummaryDto { inserted: 1, skipped: 1 });
        assert_eq!(posts.count_posts().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn colliding_checksums_with_distinct_links_are_both_kept() {
        let feeds = InMemoryFeeds::default();
        let posts = InMemoryPosts::default();
        let feed = feeds
            .create_feed(&NewFeed {
                blog: "b".into(),
                name: "n".into(),
                email: "e@x.dev".into(),
                rss_url: "https://x.dev/rss".into(),
            })
            .await
            .unwrap()
            .unwrap();
        let uc = IngestPosts {
            feeds: &feeds,
            posts: &posts,
        };
        let links = ["https://x.dev/plumless", "https://x.dev/buckeroo"];
        assert_eq!(checksum(links[0]), checksum(links[1]));
        let out = uc
            .execute(feed.id, links.iter().map(|l| item(l)).collect())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(out, IngestSummaryDto { inserted: 2, skipped: 0 });
    }

    #[tokio::test]
    async fn unknown_feed_is_none() {
        let feeds = InMemoryFeeds::default();
        let posts = InMemoryPosts::default();
        let uc = IngestPosts {
            feeds: &feeds,
            posts: &posts,
        };
        assert!(uc.execute(Uuid::new_v4(), vec![]).await.unwrap().is_none());
    }
}
