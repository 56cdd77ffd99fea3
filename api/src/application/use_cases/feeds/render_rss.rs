use crate::application::ports::post_repository::PostRepository;
use crate::application::services::rss::{RssChannel, render_rss};

pub const RSS_ITEM_LIMIT: i64 = 50;

pub struct RenderRss<'a, R: PostRepository + ?Sized> {
    pub repo: &'a R,
    pub channel: RssChannel,
}

impl<'a, R: PostRepository + ?Sized> RenderRss<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<String> {
        let posts = self.repo.list_posts(RSS_ITEM_LIMIT, 0).await?;
        Ok(render_rss(&self.channel, &posts))
    }
}
