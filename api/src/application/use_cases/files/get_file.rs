use uuid::Uuid;

use crate::application::ports::files_repository::FilesRepository;
use crate::application::ports::storage_port::StoragePort;

pub struct GetFile<'a, R, S>
where
    R: FilesRepository + ?Sized,
    S: StoragePort + ?Sized,
{
    pub repo: &'a R,
    pub storage: &'a S,
}

pub struct FileContent {
    pub bytes: Vec<u8>,
    pub content_type: Option<String>,
}

pub enum GetFileOutcome {
    Found(FileContent),
    NotFound,
    Forbidden,
}

impl<'a, R, S> GetFile<'a, R, S>
where
    R: FilesRepository + ?Sized,
    S: StoragePort + ?Sized,
{
    pub async fn execute(&self, user_id: Uuid, file_id: Uuid) -> anyhow::Result<GetFileOutcome> {
        let Some(meta) = self.repo.get_file_meta(file_id).await? else {
            return Ok(GetFileOutcome::NotFound);
        };
        if meta.owner_id != user_id {
            return Ok(GetFileOutcome::Forbidden);
        }
        match self.storage.read_bytes(&meta.storage_path).await {
            Ok(bytes) => Ok(GetFileOutcome::Found(FileContent {
                bytes,
                content_type: meta.content_type,
            })),
            Err(err) => {
                tracing::warn!(error = ?err, file_id = %file_id, "stored_file_missing");
                Ok(GetFileOutcome::NotFound)
            }
        }
    }
}
