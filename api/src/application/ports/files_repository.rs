use async_trait::async_trait;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct FileMeta {
    pub storage_path: String,
    pub content_type: Option<String>,
    pub owner_id: Uuid,
}

#[async_trait]
pub trait FilesRepository: Send + Sync {
    async fn insert_file(
        &self,
        owner_id: Uuid,
        folder: &str,
        filename: &str,
        content_type: Option<&str>,
        size: i64,
        storage_path: &str,
    ) -> anyhow::Result<Uuid>;
    async fn get_file_meta(&self, file_id: Uuid) -> anyhow::Result<Option<FileMeta>>;
}
