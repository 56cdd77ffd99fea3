use async_trait::async_trait;
use sqlx::Row;
use uuid::Uuid;

use crate::application::ports::files_repository::{FileMeta, FilesRepository};
use crate::infrastructure::db::PgPool;

pub struct SqlxFilesRepository {
    pub pool: PgPool,
}

impl SqlxFilesRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FilesRepository for SqlxFilesRepository {
    async fn insert_file(
        &self,
        owner_id: Uuid,
        folder: &str,
        filename: &str,
        content_type: Option<&str>,
        size: i64,
        storage_path: &str,
    ) -> anyhow::Result<Uuid> {
        let row = sqlx::query(
            r#"INSERT INTO files (owner_id, folder, filename, content_type, size, storage_path)
               VALUES ($1, $2, $3, $4, $5, $6)
               RETURNING id"#,
        )
        .bind(owner_id)
        .bind(folder)
        .bind(filename)
        .bind(content_type)
        .bind(size)
        .bind(storage_path)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.get("id"))
    }

    async fn get_file_meta(&self, file_id: Uuid) -> anyhow::Result<Option<FileMeta>> {
        let row =
            sqlx::query("SELECT storage_path, content_type, owner_id FROM files WHERE id = $1")
                .bind(file_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|r| FileMeta {
            storage_path: r.get("storage_path"),
            content_type: r.try_get::<Option<String>, _>("content_type").ok().flatten(),
            owner_id: r.get("owner_id"),
        }))
    }
}
