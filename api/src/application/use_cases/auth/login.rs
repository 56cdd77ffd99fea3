use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordVerifier},
};

use crate::application::ports::user_repository::{UserRepository, UserRow};

pub struct Login<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl<'a, R: UserRepository + ?Sized> Login<'a, R> {
    pub async fn execute(&self, req: &LoginRequest) -> anyhow::Result<Option<UserRow>> {
        let row = match self.repo.find_by_email(&req.email).await? {
            Some(r) => r,
            None => return Ok(None),
        };
        let Some(hash) = row.password_hash.as_deref() else {
            return Ok(None);
        };
        let parsed = PasswordHash::new(hash).map_err(|e| anyhow::anyhow!(e.to_string()))?;
        if Argon2::default()
            .verify_password(req.password.as_bytes(), &parsed)
            .is_ok()
        {
            Ok(Some(UserRow {
                password_hash: None,
                ..row
            }))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::InMemoryUsers;
    use crate::application::use_cases::auth::register::{Register, RegisterRequest};

    async fn seeded() -> InMemoryUsers {
        let repo = InMemoryUsers::default();
        Register { repo: &repo }
            .execute(&RegisterRequest {
                email: "a@b.dev".into(),
                user_name: "alice".into(),
                password: "s3cret-pass".into(),
            })
            .await
            .unwrap();
        repo
    }

    #[tokio::test]
    async fn accepts_correct_password_and_strips_hash() {
        let repo = seeded().await;
        let user = Login { repo: &repo }
            .execute(&LoginRequest {
                email: "a@b.dev".into(),
                password: "s3cret-pass".into(),
            })
            .await
            .unwrap()
            .unwrap();
        assert_eq!(user.user_name, "alice");
        assert!(user.password_hash.is_none());
    }

    #[tokio::test]
    async fn rejects_wrong_password_and_unknown_email() {
        let repo = seeded().await;
        let uc = Login { repo: &repo };
        let wrong = LoginRequest {
            email: "a@b.dev".into(),
            password: "nope".into(),
        };
        assert!(uc.execute(&wrong).await.unwrap().is_none());
        let unknown = LoginRequest {
            email: "x@y.dev".into(),
            password: "s3cret-pass".into(),
        };
        assert!(uc.execute(&unknown).await.unwrap().is_none());
    }
}
