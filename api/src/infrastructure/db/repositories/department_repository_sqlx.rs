use async_trait::async_trait;
use sqlx::Row;

use crate::application::ports::department_repository::DepartmentRepository;
use crate::domain::departments::DepartmentRow;
use crate::infrastructure::db::PgPool;

pub struct SqlxDepartmentRepository {
    pub pool: PgPool,
}

impl SqlxDepartmentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DepartmentRepository for SqlxDepartmentRepository {
    async fn list_departments(&self) -> anyhow::Result<Vec<DepartmentRow>> {
        let rows = sqlx::query("SELECT id, name, level, parent_id FROM departments ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows
            .into_iter()
            .map(|r| DepartmentRow {
                id: r.get("id"),
                name: r.get("name"),
                level: r.get("level"),
                parent_id: r.try_get::<Option<i64>, _>("parent_id").ok().flatten(),
            })
            .collect())
    }
}
