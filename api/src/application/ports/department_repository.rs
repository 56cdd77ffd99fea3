use async_trait::async_trait;

use crate::domain::departments::DepartmentRow;

#[async_trait]
pub trait DepartmentRepository: Send + Sync {
    async fn list_departments(&self) -> anyhow::Result<Vec<DepartmentRow>>;
}
