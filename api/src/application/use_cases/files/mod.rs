pub mod get_file;
pub mod upload_file;
