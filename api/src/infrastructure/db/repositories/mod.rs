pub mod department_repository_sqlx;
pub mod feed_repository_sqlx;
pub mod files_repository_sqlx;
pub mod post_repository_sqlx;
pub mod user_repository_sqlx;
