use super::client::YtClient;
use super::types::{VideoItem, VideosListResponse};
use crate::error::YtError;

const VIDEO_PARTS: &str = "statistics,snippet,contentDetails";

/// Field mask for single-video lookups.
pub const VIDEO_FIELDS: &str = "items(id,snippet(title,description,publishedAt,thumbnails(default,high,maxres)),statistics(viewCount,likeCount,commentCount),contentDetails(duration))";

pub fn batch_params(ids: &[String]) -> Vec<(&'static str, String)> {
    vec![("part", VIDEO_PARTS.to_owned()), ("id", ids.join(","))]
}

pub fn single_video_params(video_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("part", VIDEO_PARTS.to_owned()),
        ("fields", VIDEO_FIELDS.to_owned()),
        ("id", video_id.to_owned()),
    ]
}

pub async fn videos_list(client: &YtClient, ids: &[String]) -> Result<VideosListResponse, YtError> {
    // videos.list rejects a request without ids.
    if ids.is_empty() {
        return Ok(VideosListResponse::default());
    }
    let parsed = client
        .get_json::<VideosListResponse>("videos", &batch_params(ids))
        .await?;
    tracing::debug!(requested = ids.len(), items = parsed.items.len(), "videos.list returned");
    Ok(parsed)
}

pub async fn video_by_id(client: &YtClient, video_id: &str) -> Result<VideoItem, YtError> {
    let resp = client
        .get_json::<VideosListResponse>("videos", &single_video_params(video_id))
        .await?;
    resp.items
        .into_iter()
        .next()
        .ok_or_else(|| YtError::NotFound("Video not found".to_owned()))
}
