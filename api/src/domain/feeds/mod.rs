pub mod feed;
pub mod post;
