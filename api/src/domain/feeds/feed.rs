use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Feed {
    pub id: Uuid,
    pub blog: String,
    pub name: String,
    pub email: String,
    pub rss_url: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
