use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::types::{ChannelItem, SearchListResponse, VideoItem, VideosListResponse};
use super::{channels, search, videos};
use crate::error::YtError;

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// The five read operations the relay needs from the Data API.
#[async_trait]
pub trait YouTubeApi: Send + Sync {
    async fn search_channels(&self, query: &str) -> Result<SearchListResponse, YtError>;

    /// Fails with [`YtError::NotFound`] when no channel has this id.
    async fn channel(&self, channel_id: &str) -> Result<ChannelItem, YtError>;

    /// Newest first. An empty `page_token` requests the first page.
    async fn channel_videos(
        &self,
        channel_id: &str,
        page_token: Option<&str>,
    ) -> Result<SearchListResponse, YtError>;

    /// Returns an empty list without calling upstream when `video_ids` is empty.
    async fn videos_details(&self, video_ids: &[String]) -> Result<VideosListResponse, YtError>;

    /// Fails with [`YtError::NotFound`] when no video has this id.
    async fn video(&self, video_id: &str) -> Result<VideoItem, YtError>;
}

/// Data API v3 client. Cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct YtClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for YtClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YtClient")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

impl YtClient {
    pub fn with_base_url(api_key: &str, base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.trim().to_owned(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    /// Endpoint URL with every parameter except the key, safe to log.
    pub fn endpoint_url(&self, endpoint: &str, params: &[(&str, String)]) -> String {
        let mut url = format!("{}/{}", self.base_url, endpoint);
        for (i, (k, v)) in params.iter().enumerate() {
            url.push(if i == 0 { '?' } else { '&' });
            url.push_str(k);
            url.push('=');
            url.push_str(&urlencoding::encode(v));
        }
        url
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, YtError> {
        let url = self.endpoint_url(endpoint, params);
        tracing::debug!(%url, "calling YouTube {endpoint}.list");

        let separator = if params.is_empty() { '?' } else { '&' };
        let keyed = format!("{url}{separator}key={}", urlencoding::encode(&self.api_key));

        let resp = self.http.get(&keyed).send().await?;
        let status = resp.status();
        let bytes = resp.bytes().await?;
        if !status.is_success() {
            let body = String::from_utf8_lossy(&bytes);
            return Err(YtError::Upstream {
                status: status.as_u16(),
                message: format_youtube_error(status, &body, &format!("{endpoint}.list")),
            });
        }
        Ok(serde_json::from_slice::<T>(&bytes)?)
    }
}

#[async_trait]
impl YouTubeApi for YtClient {
    async fn search_channels(&self, query: &str) -> Result<SearchListResponse, YtError> {
        search::search_list(self, &search::channel_search_params(query)).await
    }

    async fn channel(&self, channel_id: &str) -> Result<ChannelItem, YtError> {
        channels::channel_by_id(self, channel_id).await
    }

    async fn channel_videos(
        &self,
        channel_id: &str,
        page_token: Option<&str>,
    ) -> Result<SearchListResponse, YtError> {
        let params = search::channel_videos_params(channel_id, page_token);
        search::search_list(self, &params).await
    }

    async fn videos_details(&self, video_ids: &[String]) -> Result<VideosListResponse, YtError> {
        videos::videos_list(self, video_ids).await
    }

    async fn video(&self, video_id: &str) -> Result<VideoItem, YtError> {
        videos::video_by_id(self, video_id).await
    }
}

#[derive(Deserialize, Debug)]
struct GoogleApiErrorResponse {
    error: GoogleApiError,
}

#[derive(Deserialize, Debug)]
struct GoogleApiError {
    message: String,
    #[serde(default)]
    errors: Vec<GoogleApiErrorDetail>,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Deserialize, Debug)]
struct GoogleApiErrorDetail {
    reason: Option<String>,
}

/// One-line summary of a failed call, built from the Google error envelope
/// when the body carries one.
pub fn format_youtube_error(status: reqwest::StatusCode, body: &str, endpoint: &str) -> String {
    let Ok(GoogleApiErrorResponse { error }) = serde_json::from_str(body) else {
        return format!("YouTube {endpoint} failed (HTTP {}): {}", status.as_u16(), body.trim());
    };

    let reason = error
        .errors
        .into_iter()
        .next()
        .and_then(|detail| detail.reason)
        .filter(|reason| !reason.is_empty())
        .map(|reason| format!("reason={reason}"));
    let qualifiers: Vec<String> = [
        Some(format!("HTTP {}", status.as_u16())),
        error.status.filter(|s| !s.is_empty()),
        reason,
    ]
    .into_iter()
    .flatten()
    .collect();

    format!(
        "YouTube {endpoint} failed ({}): {}",
        qualifiers.join(", "),
        error.message
    )
}
