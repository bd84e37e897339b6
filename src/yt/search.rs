use super::client::YtClient;
use super::types::SearchListResponse;
use crate::error::YtError;

pub const CHANNEL_SEARCH_LIMIT: u32 = 5;
pub const CHANNEL_VIDEOS_PAGE_SIZE: u32 = 50;

pub fn channel_search_params(query: &str) -> Vec<(&'static str, String)> {
    vec![
        ("part", "snippet".to_owned()),
        ("type", "channel".to_owned()),
        ("maxResults", CHANNEL_SEARCH_LIMIT.to_string()),
        ("q", query.to_owned()),
    ]
}

pub fn channel_videos_params(
    channel_id: &str,
    page_token: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut params = vec![
        ("part", "snippet".to_owned()),
        ("channelId", channel_id.to_owned()),
        ("order", "date".to_owned()),
        ("type", "video".to_owned()),
        ("maxResults", CHANNEL_VIDEOS_PAGE_SIZE.to_string()),
    ];
    if let Some(token) = page_token.filter(|t| !t.is_empty()) {
        params.push(("pageToken", token.to_owned()));
    }
    params
}

pub async fn search_list(
    client: &YtClient,
    params: &[(&str, String)],
) -> Result<SearchListResponse, YtError> {
    let parsed = client.get_json::<SearchListResponse>("search", params).await?;
    tracing::debug!(items = parsed.items.len(), "search.list returned");
    Ok(parsed)
}
