use crate::domain::feeds::post::Post;

#[derive(Debug, Clone)]
pub struct PostPageDto {
    pub items: Vec<Post>,
    pub total: i64,
    pub page_size: u32,
    pub page_number: u32,
}

#[derive(Debug, Clone)]
pub struct IngestPostInput {
    pub title: String,
    pub link: String,
    pub summary: Option<String>,
    pub thumbnail: Option<String>,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IngestSummaryDto {
    pub inserted: u32,
    pub skipped: u32,
}
