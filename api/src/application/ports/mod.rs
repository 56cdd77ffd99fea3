pub mod department_repository;
pub mod feed_repository;
pub mod files_repository;
pub mod post_repository;
pub mod storage_port;
pub mod user_repository;
