use super::client::YtClient;
use super::types::{ChannelItem, ChannelsListResponse};
use crate::error::YtError;

pub fn channel_params(channel_id: &str) -> Vec<(&'static str, String)> {
    vec![
        ("part", "snippet,statistics,brandingSettings".to_owned()),
        ("id", channel_id.to_owned()),
    ]
}

pub async fn channels_list(
    client: &YtClient,
    params: &[(&str, String)],
) -> Result<ChannelsListResponse, YtError> {
    client.get_json::<ChannelsListResponse>("channels", params).await
}

pub async fn channel_by_id(client: &YtClient, channel_id: &str) -> Result<ChannelItem, YtError> {
    let resp = channels_list(client, &channel_params(channel_id)).await?;
    resp.items
        .into_iter()
        .next()
        .ok_or_else(|| YtError::NotFound("Channel not found".to_owned()))
}
