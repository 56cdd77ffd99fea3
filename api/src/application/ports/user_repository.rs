use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::users::Role;

#[derive(Debug, Clone)]
pub struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub user_name: String,
    pub password_hash: Option<String>,
    pub role: Role,
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// `Ok(None)` when the email or user name is already stored.
    async fn create_user(
        &self,
        email: &str,
        user_name: &str,
        password_hash: &str,
        role: Role,
    ) -> anyhow::Result<Option<UserRow>>;
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>>;
    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRow>>;
    async fn user_name_exists(&self, user_name: &str) -> anyhow::Result<bool>;
}
