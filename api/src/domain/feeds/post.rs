use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Post {
    pub id: Uuid,
    pub feed_id: Uuid,
    pub blog: String,
    pub title: String,
    pub link: String,
    pub summary: Option<String>,
    pub thumbnail: Option<String>,
    pub checksum: String,
    pub published_at: chrono::DateTime<chrono::Utc>,
}

/// A post as delivered by the crawler, before it has an id.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub feed_id: Uuid,
    pub title: String,
    pub link: String,
    pub summary: Option<String>,
    pub thumbnail: Option<String>,
    pub checksum: String,
    pub published_at: chrono::DateTime<chrono::Utc>,
}
