use crate::domain::feeds::feed::Feed;

#[derive(Debug, Clone)]
pub struct FeedPageDto {
    pub items: Vec<Feed>,
    pub total: i64,
    pub page_size: u32,
    pub page_number: u32,
}
