use crate::application::ports::department_repository::DepartmentRepository;
use crate::domain::departments::{DepartmentNode, build_tree};

pub struct GetDepartmentTree<'a, R: DepartmentRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: DepartmentRepository + ?Sized> GetDepartmentTree<'a, R> {
    pub async fn execute(&self) -> anyhow::Result<Vec<DepartmentNode>> {
        let rows = self.repo.list_departments().await?;
        Ok(build_tree(rows))
    }
}
