pub mod auth;
pub mod departments;
pub mod feeds;
pub mod files;
pub mod posts;
pub mod users;
