pub mod crc32;
pub mod rss;
pub mod session;
