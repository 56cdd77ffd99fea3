use async_trait::async_trait;
use sqlx::Row;
use sqlx::postgres::PgRow;
use uuid::Uuid;

use crate::application::ports::user_repository::{UserRepository, UserRow};
use crate::domain::users::Role;
use crate::infrastructure::db::PgPool;

pub struct SqlxUserRepository {
    pub pool: PgPool,
}

impl SqlxUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn map_row(r: &PgRow, with_hash: bool) -> UserRow {
    let role: String = r.get("role");
    UserRow {
        id: r.get("id"),
        email: r.get("email"),
        user_name: r.get("user_name"),
        password_hash: if with_hash {
            r.try_get::<Option<String>, _>("password_hash").ok().flatten()
        } else {
            None
        },
        role: Role::parse(&role),
    }
}

#[async_trait]
impl UserRepository for SqlxUserRepository {
    async fn create_user(
        &self,
        email: &str,
        user_name: &str,
        password_hash: &str,
        role: Role,
    ) -> anyhow::Result<Option<UserRow>> {
        let row = sqlx::query(
            r#"INSERT INTO users (email, user_name, password_hash, role) VALUES ($1, $2, $3, $4)
               ON CONFLICT DO NOTHING
               RETURNING id, email, user_name, password_hash, role"#,
        )
        .bind(email)
        .bind(user_name)
        .bind(password_hash)
        .bind(role.as_str())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| map_row(&r, true)))
    }

    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<UserRow>> {
        let row = sqlx::query(
            r#"SELECT id, email, user_name, password_hash, role FROM users WHERE email = $1"#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(|r| map_row(&r, true)))
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<UserRow>> {
        let row = sqlx::query(r#"SELECT id, email, user_name, role FROM users WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| map_row(&r, false)))
    }

    async fn user_name_exists(&self, user_name: &str) -> anyhow::Result<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE user_name = $1)",
        )
        .bind(user_name)
        .fetch_one(&self.pool)
        .await?;
        Ok(exists)
    }
}
