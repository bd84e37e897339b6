//! Response records served by the HTTP API.
//!
//! Every key is always present. Counters are strings and default to `"0"`,
//! text fields default to the empty string.

use serde::Serialize;

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelSearch {
    pub channels: Vec<ChannelSummary>,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChannelSummary {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail_url: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct ChannelDetail {
    pub id: String,
    pub statistics: ChannelCounts,
    pub details: ChannelInfo,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ChannelCounts {
    pub subscriber_count: String,
    pub video_count: String,
    pub view_count: String,
}

impl Default for ChannelCounts {
    fn default() -> Self {
        Self {
            subscriber_count: ZERO.to_owned(),
            video_count: ZERO.to_owned(),
            view_count: ZERO.to_owned(),
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChannelInfo {
    pub title: String,
    pub description: String,
    pub published_at: String,
    pub thumbnail_url: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChannelVideos {
    pub videos: Vec<VideoDetail>,
    pub next_page_token: Option<String>,
    pub total_results: u64,
}

/// One video, as served by `/api/videos/{id}` and inside channel listings.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetail {
    pub id: String,
    pub statistics: VideoCounts,
    pub title: String,
    pub description: String,
    pub published_at: String,
    pub thumbnail_url: String,
    pub duration: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VideoCounts {
    pub view_count: String,
    pub like_count: String,
    pub comment_count: String,
}

impl Default for VideoCounts {
    fn default() -> Self {
        Self {
            view_count: ZERO.to_owned(),
            like_count: ZERO.to_owned(),
            comment_count: ZERO.to_owned(),
        }
    }
}

pub(crate) const ZERO: &str = "0";
