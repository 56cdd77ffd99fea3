pub mod ingest_posts;
pub mod list_posts;
