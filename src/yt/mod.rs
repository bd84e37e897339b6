pub mod channels;
pub mod client;
pub mod search;
pub mod types;
pub mod videos;

pub use client::{DEFAULT_BASE_URL, YouTubeApi, YtClient};
