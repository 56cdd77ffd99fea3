use crate::application::ports::feed_repository::{FeedRepository, NewFeed};
use crate::domain::feeds::feed::Feed;

pub struct RegisterFeed<'a, R: FeedRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FeedRepository + ?Sized> RegisterFeed<'a, R> {
    /// `Ok(None)` when the RSS URL is already registered.
    pub async fn execute(&self, input: NewFeed) -> anyhow::Result<Option<Feed>> {
        let input = NewFeed {
            blog: input.blog.trim().to_string(),
            name: input.name.trim().to_string(),
            email: input.email.trim().to_string(),
            rss_url: input.rss_url.trim().trim_end_matches('/').to_string(),
        };
        let created = self.repo.create_feed(&input).await?;
        match &created {
            Some(feed) => tracing::info!(feed_id = %feed.id, rss_url = %feed.rss_url, "feed_registered"),
            None => tracing::debug!(rss_url = %input.rss_url, "feed_already_registered"),
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::InMemoryFeeds;

    fn input(url: &str) -> NewFeed {
        NewFeed {
            blog: " My Blog ".into(),
            name: "alice".into(),
            email: "a@b.dev".into(),
            rss_url: url.into(),
        }
    }

    #[tokio::test]
    async fn normalises_and_rejects_duplicates() {
        let repo = InMemoryFeeds::default();
        let uc = RegisterFeed { repo: &repo };
        let feed = uc
            .execute(input("https://blog.dev/rss/"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(feed.blog, "My Blog");
        assert_eq!(feed.rss_url, "https://blog.dev/rss");
        assert!(uc.execute(input("https://blog.dev/rss")).await.unwrap().is_none());
    }
}
