use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::io::AsyncWriteExt;

use crate::application::ports::storage_port::{StoragePort, StoredUpload};
use crate::domain::files::UploadFolder;

pub struct FsStoragePort {
    pub uploads_root: PathBuf,
}

impl FsStoragePort {
    pub fn new(uploads_root: impl AsRef<Path>) -> Self {
        Self {
            uploads_root: uploads_root.as_ref().to_path_buf(),
        }
    }
}

#[async_trait::async_trait]
impl StoragePort for FsStoragePort {
    async fn store_upload(
        &self,
        folder: UploadFolder,
        original_filename: Option<&str>,
        bytes: &[u8],
    ) -> anyhow::Result<StoredUpload> {
        use tokio::fs;

        let dir = self.uploads_root.join(folder.as_str());
        fs::create_dir_all(&dir).await?;

        let ts = chrono::Utc::now().format("%Y%m%d-%H%M%S").to_string();
        let base = crate::infrastructure::storage::timestamped_name(
            original_filename.unwrap_or("file.bin"),
            &ts,
        );
        let mut safe = base.clone();
        let mut candidate = dir.join(&safe);
        let mut counter = 1;
        let mut file = loop {
            match fs::OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(&candidate)
                .await
            {
                Ok(file) => break file,
                Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                    safe = crate::infrastructure::storage::numbered_name(&base, counter);
                    candidate = dir.join(&safe);
                    counter += 1;
                }
                Err(e) => return Err(e.into()),
            }
        };
        file.write_all(bytes).await?;
        file.flush().await?;
        let relative = crate::infrastructure::storage::relative_from_uploads(
            self.uploads_root.as_path(),
            &candidate,
        );
        tracing::debug!(path = %relative, size = bytes.len(), "upload_stored");

        Ok(StoredUpload {
            filename: safe,
            absolute_path: candidate,
            relative_path: relative,
            size: bytes.len() as i64,
        })
    }

    fn resolve(&self, relative_path: &str) -> anyhow::Result<PathBuf> {
        crate::infrastructure::storage::join_under_root(self.uploads_root.as_path(), relative_path)
    }

    async fn read_bytes(&self, relative_path: &str) -> anyhow::Result<Vec<u8>> {
        let path = self.resolve(relative_path)?;
        let data = tokio::fs::read(path).await?;
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn same_name_in_same_second_gets_numbered() {
        let temp = TempDir::new().unwrap();
        let port = FsStoragePort::new(temp.path());
        let a = port
            .store_upload(UploadFolder::Post, Some("x.txt"), b"1")
            .await
            .unwrap();
        let b = port
            .store_upload(UploadFolder::Post, Some("x.txt"), b"2")
            .await
            .unwrap();
        assert_ne!(a.relative_path, b.relative_path);
        assert!(a.relative_path.starts_with("post/"));
        assert!(b.absolute_path.starts_with(temp.path()));
        assert_eq!(port.read_bytes(&b.relative_path).await.unwrap(), b"2");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_uploads_never_share_a_path() {
        let temp = TempDir::new().unwrap();
        let port = FsStoragePort::new(temp.path());
        let (a, b) = tokio::join!(
            port.store_upload(UploadFolder::Profile, Some("me.png"), b"first"),
            port.store_upload(UploadFolder::Profile, Some("me.png"), b"second"),
        );
        let (a, b) = (a.unwrap(), b.unwrap());
        assert_ne!(a.relative_path, b.relative_path);
        assert_eq!(port.read_bytes(&a.relative_path).await.unwrap(), b"first");
        assert_eq!(port.read_bytes(&b.relative_path).await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn existing_file_is_never_overwritten() {
        let temp = TempDir::new().unwrap();
        let port = FsStoragePort::new(temp.path());
        let a = port
            .store_upload(UploadFolder::Feed, Some("logo.svg"), b"old")
            .await
            .unwrap();
        let b = port
            .store_upload(UploadFolder::Feed, Some("logo.svg"), b"new")
            .await
            .unwrap();
        assert_eq!(port.read_bytes(&a.relative_path).await.unwrap(), b"old");
        assert_eq!(port.read_bytes(&b.relative_path).await.unwrap(), b"new");
    }

    #[tokio::test]
    async fn refuses_reads_outside_root() {
        let temp = TempDir::new().unwrap();
        let port = FsStoragePort::new(temp.path().join("uploads"));
        assert!(port.read_bytes("../secret").await.is_err());
    }
}
