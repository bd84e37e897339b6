use serde::{Deserialize, Deserializer};

#[derive(Deserialize, Debug, Default)]
pub struct SearchListResponse {
    #[serde(rename = "nextPageToken")]
    pub next_page_token: Option<String>,
    #[serde(rename = "pageInfo")]
    pub page_info: Option<PageInfo>,
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Deserialize, Debug, Default)]
pub struct PageInfo {
    #[serde(rename = "totalResults", default)]
    pub total_results: u64,
}

#[derive(Deserialize, Debug, Default)]
pub struct SearchItem {
    #[serde(default)]
    pub id: SearchId,
    pub snippet: Option<Snippet>,
}

#[derive(Deserialize, Debug, Default)]
pub struct SearchId {
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
    #[serde(rename = "channelId")]
    pub channel_id: Option<String>,
}

/// Descriptive metadata shared by search results, channels and videos.
#[derive(Deserialize, Debug, Default)]
#[serde(default)]
pub struct Snippet {
    pub title: String,
    pub description: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    pub thumbnails: Option<Thumbs>,
}

impl Snippet {
    pub fn thumbnail_url(&self) -> String {
        self.thumbnails
            .as_ref()
            .and_then(Thumbs::preferred_url)
            .unwrap_or_default()
            .to_owned()
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct Thumbs {
    pub default: Option<Thumb>,
    pub medium: Option<Thumb>,
    pub high: Option<Thumb>,
    pub maxres: Option<Thumb>,
}

impl Thumbs {
    /// The `default` rendition, falling back to larger ones when the
    /// response was trimmed by a field mask.
    pub fn preferred_url(&self) -> Option<&str> {
        [&self.default, &self.medium, &self.high, &self.maxres]
            .into_iter()
            .flatten()
            .map(|thumb| thumb.url.as_str())
            .find(|url| !url.is_empty())
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct Thumb {
    #[serde(default)]
    pub url: String,
}

#[derive(Deserialize, Debug, Default)]
pub struct ChannelsListResponse {
    #[serde(default)]
    pub items: Vec<ChannelItem>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ChannelItem {
    #[serde(default)]
    pub id: String,
    pub snippet: Option<Snippet>,
    pub statistics: Option<ChannelStatistics>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ChannelStatistics {
    #[serde(rename = "subscriberCount", default, deserialize_with = "count")]
    pub subscriber_count: Option<String>,
    #[serde(rename = "videoCount", default, deserialize_with = "count")]
    pub video_count: Option<String>,
    #[serde(rename = "viewCount", default, deserialize_with = "count")]
    pub view_count: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct VideosListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Deserialize, Debug, Default)]
pub struct VideoItem {
    #[serde(default)]
    pub id: String,
    pub snippet: Option<Snippet>,
    pub statistics: Option<VideoStatistics>,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<ContentDetails>,
}

#[derive(Deserialize, Debug, Default)]
pub struct VideoStatistics {
    #[serde(rename = "viewCount", default, deserialize_with = "count")]
    pub view_count: Option<String>,
    #[serde(rename = "likeCount", default, deserialize_with = "count")]
    pub like_count: Option<String>,
    #[serde(rename = "commentCount", default, deserialize_with = "count")]
    pub comment_count: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct ContentDetails {
    #[serde(default)]
    pub duration: String,
}

// The Data API sends counters as strings, mocks and older fixtures as numbers.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCount {
    Text(String),
    Number(u64),
}

fn count<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawCount>::deserialize(deserializer)?;
    Ok(raw.map(|value| match value {
        RawCount::Text(text) => text,
        RawCount::Number(n) => n.to_string(),
    }))
}
