use argon2::{
    Argon2,
    password_hash::{PasswordHasher, SaltString},
};
use password_hash::rand_core::OsRng;

use crate::application::ports::user_repository::{UserRepository, UserRow};
use crate::domain::users::Role;

pub struct Register<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub user_name: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Register<'a, R> {
    /// `Ok(None)` when the email or user name is already taken.
    pub async fn execute(&self, req: &RegisterRequest) -> anyhow::Result<Option<UserRow>> {
        if self.repo.find_by_email(&req.email).await?.is_some()
            || self.repo.user_name_exists(&req.user_name).await?
        {
            return Ok(None);
        }
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(req.password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?
            .to_string();
        let Some(user) = self
            .repo
            .create_user(&req.email, &req.user_name, &hash, Role::User)
            .await?
        else {
            return Ok(None);
        };
        tracing::info!(user_id = %user.id, "user_registered");
        Ok(Some(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::InMemoryUsers;
    use async_trait::async_trait;
    use uuid::Uuid;

    /// Lookups never see existing rows, as when two registrations race.
    struct RacingUsers(InMemoryUsers);

    #[async_trait]
    impl UserRepository for RacingUsers {
        async fn create_user(
            &self,
            email: &str,
            user_name: &str,
            password_hash: &str,
            role: Role,
        ) -> anyhow::Result<Option<UserRow>> {
            self.0.create_user(email, user_name, password_hash, role).await
        }
        async fn find_by_email(&self, _email: &str) -> anyhow::Result<Option<UserRow>> {
            Ok(None)
        }
        async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRow>> {
            self.0.find_by_id(id).await
        }
        async fn user_name_exists(&self, _user_name: &str) -> anyhow::Result<bool> {
            Ok(false)
        }
    }

    fn req(email: &str, user_name: &str) -> RegisterRequest {
        RegisterRequest {
            email: email.into(),
            user_name: user_name.into(),
            password: "correct horse".into(),
        }
    }

    #[tokio::test]
    async fn stores_hashed_password_with_user_role() {
        let repo = InMemoryUsers::default();
        let uc = Register { repo: &repo };
        let user = uc.execute(&req("a@b.dev", "alice")).await.unwrap().unwrap();
        assert_eq!(user.role, Role::User);
        let stored = repo.find_by_email("a@b.dev").await.unwrap().unwrap();
        let hash = stored.password_hash.unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(!hash.contains("correct horse"));
    }

    #[tokio::test]
    async fn rejects_taken_email_or_user_name() {
        let repo = InMemoryUsers::default();
        let uc = Register { repo: &repo };
        uc.execute(&req("a@b.dev", "alice")).await.unwrap().unwrap();
        assert!(uc.execute(&req("a@b.dev", "other")).await.unwrap().is_none());
        assert!(uc.execute(&req("c@d.dev", "alice")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn insert_conflict_after_lookup_is_reported_as_taken() {
        let repo = RacingUsers(InMemoryUsers::default());
        let uc = Register { repo: &repo };
        uc.execute(&req("a@b.dev", "alice")).await.unwrap().unwrap();
        assert!(uc.execute(&req("a@b.dev", "alice")).await.unwrap().is_none());
    }
}
