use crate::error::YtError;
use crate::models::{
    ChannelCounts, ChannelDetail, ChannelInfo, ChannelSearch, ChannelSummary, ChannelVideos,
    VideoCounts, VideoDetail, ZERO,
};
use crate::yt::YouTubeApi;
use crate::yt::types::{ChannelItem, SearchItem, SearchListResponse, VideoItem};

pub async fn search_channels(api: &dyn YouTubeApi, query: &str) -> Result<ChannelSearch, YtError> {
    let response = api.search_channels(query).await?;
    let channels = response.items.into_iter().map(map_channel_summary).collect();
    Ok(ChannelSearch { channels })
}

pub async fn channel_statistics(
    api: &dyn YouTubeApi,
    channel_id: &str,
) -> Result<ChannelDetail, YtError> {
    let channel = api.channel(channel_id).await?;
    Ok(map_channel_detail(channel))
}

/// One page of a channel's uploads, newest first, with full video details.
pub async fn channel_videos(
    api: &dyn YouTubeApi,
    channel_id: &str,
    page_token: Option<&str>,
) -> Result<ChannelVideos, YtError> {
    let SearchListResponse {
        next_page_token,
        page_info,
        items,
    } = api.channel_videos(channel_id, page_token).await?;

    let request_ids: Vec<String> = items
        .into_iter()
        .filter_map(|item| item.id.video_id)
        .collect();

    let videos = if request_ids.is_empty() {
        Vec::new()
    } else {
        api.videos_details(&request_ids)
            .await?
            .items
            .into_iter()
            .map(map_video_item)
            .collect()
    };

    Ok(ChannelVideos {
        videos,
        next_page_token,
        total_results: page_info.map_or(0, |info| info.total_results),
    })
}

pub async fn video_statistics(api: &dyn YouTubeApi, video_id: &str) -> Result<VideoDetail, YtError> {
    let video = api.video(video_id).await?;
    Ok(map_video_item(video))
}

pub fn map_channel_summary(item: SearchItem) -> ChannelSummary {
    let snippet = item.snippet.unwrap_or_default();
    ChannelSummary {
        id: item.id.channel_id.unwrap_or_default(),
        thumbnail_url: snippet.thumbnail_url(),
        title: snippet.title,
        description: snippet.description,
    }
}

pub fn map_channel_detail(item: ChannelItem) -> ChannelDetail {
    let statistics = item
        .statistics
        .map(|stats| ChannelCounts {
            subscriber_count: count_or_zero(stats.subscriber_count),
            video_count: count_or_zero(stats.video_count),
            view_count: count_or_zero(stats.view_count),
        })
        .unwrap_or_default();

    let details = item
        .snippet
        .map(|snippet| ChannelInfo {
            thumbnail_url: snippet.thumbnail_url(),
            title: snippet.title,
            description: snippet.description,
            published_at: snippet.published_at,
        })
        .unwrap_or_default();

    ChannelDetail {
        id: item.id,
        statistics,
        details,
    }
}

pub fn map_video_item(item: VideoItem) -> VideoDetail {
    let statistics = item
        .statistics
        .map(|stats| VideoCounts {
            view_count: count_or_zero(stats.view_count),
            like_count: count_or_zero(stats.like_count),
            comment_count: count_or_zero(stats.comment_count),
        })
        .unwrap_or_default();
    let snippet = item.snippet.unwrap_or_default();

    VideoDetail {
        id: item.id,
        statistics,
        thumbnail_url: snippet.thumbnail_url(),
        title: snippet.title,
        description: snippet.description,
        published_at: snippet.published_at,
        duration: item
            .content_details
            .map(|details| details.duration)
            .unwrap_or_default(),
    }
}

fn count_or_zero(count: Option<String>) -> String {
    count.unwrap_or_else(|| ZERO.to_owned())
}
