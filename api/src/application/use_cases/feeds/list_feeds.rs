use crate::application::dto::feeds::FeedPageDto;
use crate::application::pagination::Pagination;
use crate::application::ports::feed_repository::FeedRepository;

pub struct ListFeeds<'a, R: FeedRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: FeedRepository + ?Sized> ListFeeds<'a, R> {
    pub async fn execute(&self, page: Pagination) -> anyhow::Result<FeedPageDto> {
        let items = self.repo.list_feeds(page.limit(), page.offset()).await?;
        let total = self.repo.count_feeds().await?;
        Ok(FeedPageDto {
            items,
            total,
            page_size: page.page_size,
            page_number: page.page_number,
        })
    }
}
