use uuid::Uuid;

use crate::application::ports::files_repository::FilesRepository;
use crate::application::ports::storage_port::StoragePort;
use crate::domain::files::UploadFolder;

pub struct UploadFile<'a, R, S>
where
    R: FilesRepository + ?Sized,
    S: StoragePort + ?Sized,
{
    pub repo: &'a R,
    pub storage: &'a S,
    pub public_base_url: Option<String>,
}

pub struct UploadedFile {
    pub id: Uuid,
    pub url: String,
    pub filename: String,
    pub content_type: Option<String>,
    pub size: i64,
}

impl<'a, R, S> UploadFile<'a, R, S>
where
    R: FilesRepository + ?Sized,
    S: StoragePort + ?Sized,
{
    pub async fn execute(
        &self,
        owner_id: Uuid,
        folder: UploadFolder,
        bytes: Vec<u8>,
        orig_filename: Option<String>,
        content_type: Option<String>,
    ) -> anyhow::Result<UploadedFile> {
        let stored = self
            .storage
            .store_upload(folder, orig_filename.as_deref(), &bytes)
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, folder = folder.as_str(), "store_upload_failed");
                err
            })?;
        let content_type = content_type.or_else(|| {
            mime_guess::from_path(&stored.filename)
                .first()
                .map(|m| m.essence_str().to_string())
        });
        let id = self
            .repo
            .insert_file(
                owner_id,
                folder.as_str(),
                &stored.filename,
                content_type.as_deref(),
                stored.size,
                &stored.relative_path,
            )
            .await
            .map_err(|err| {
                tracing::error!(error = ?err, owner_id = %owner_id, "insert_file_failed");
                err
            })?;
        let relative = stored.relative_path.trim_start_matches('/');
        let url = if let Some(base) = self.public_base_url.as_deref() {
            let origin = base.trim_end_matches('/');
            format!("{}/api/uploads/{}", origin, relative)
        } else {
            format!("/api/uploads/{}", relative)
        };
        Ok(UploadedFile {
            id,
            url,
            filename: stored.filename,
            content_type,
            size: stored.size,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::InMemoryFiles;
    use crate::infrastructure::storage::FsStoragePort;
    use tempfile::TempDir;

    #[tokio::test]
    async fn stores_bytes_under_folder_and_records_metadata() {
        let temp = TempDir::new().unwrap();
        let storage = FsStoragePort::new(temp.path());
        let repo = InMemoryFiles::default();
        let uc = UploadFile {
            repo: &repo,
            storage: &storage,
            public_base_url: Some("https://cdn.example.com/".into()),
        };
        let owner = Uuid::new_v4();
        let out = uc
            .execute(
                owner,
                UploadFolder::Profile,
                b"png-bytes".to_vec(),
                Some("me avatar.png".into()),
                None,
            )
            .await
            .unwrap();
        assert_eq!(out.size, 9);
        assert_eq!(out.content_type.as_deref(), Some("image/png"));
        assert!(out.filename.starts_with("me_avatar_"));
        assert!(out.url.starts_with("https://cdn.example.com/api/uploads/profile/"));

        let meta = repo.get_file_meta(out.id).await.unwrap().unwrap();
        assert_eq!(meta.owner_id, owner);
        assert_eq!(storage.read_bytes(&meta.storage_path).await.unwrap(), b"png-bytes");
    }
}
