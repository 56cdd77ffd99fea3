pub mod departments;
pub mod feeds;
pub mod files;
pub mod users;
