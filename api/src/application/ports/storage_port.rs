use async_trait::async_trait;
use std::path::PathBuf;

use crate::domain::files::UploadFolder;

#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub filename: String,
    pub absolute_path: PathBuf,
    pub relative_path: String,
    pub size: i64,
}

#[async_trait]
pub trait StoragePort: Send + Sync {
    async fn store_upload(
        &self,
        folder: UploadFolder,
        original_filename: Option<&str>,
        bytes: &[u8],
    ) -> anyhow::Result<StoredUpload>;
    /// Resolves a stored relative path, rejecting anything outside the uploads root.
    fn resolve(&self, relative_path: &str) -> anyhow::Result<PathBuf>;
    async fn read_bytes(&self, relative_path: &str) -> anyhow::Result<Vec<u8>>;
}
