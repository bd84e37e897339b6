use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::AppState;
use crate::error::{ApiError, RelayError};
use crate::models::{ChannelDetail, ChannelSearch, ChannelVideos, VideoDetail};
use crate::relay;

#[derive(Deserialize, Debug)]
pub struct SearchParams {
    pub query: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VideosParams {
    pub page_token: Option<String>,
}

#[axum::debug_handler]
#[instrument(name = "search_channels", skip(state))]
pub async fn search_channels(
    State(state): State<AppState>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ChannelSearch>, ApiError> {
    let Query(params) = params.map_err(|e| state.reject(e))?;
    let query = params
        .query
        .ok_or_else(|| state.reject(RelayError::MissingParameter("query")))?;
    let found = relay::search_channels(state.youtube.as_ref(), &query)
        .await
        .map_err(|e| state.reject(e))?;
    tracing::debug!(channels = found.channels.len(), "channel search done");
    Ok(Json(found))
}

#[axum::debug_handler]
#[instrument(name = "channel_statistics", skip(state))]
pub async fn channel_statistics(
    State(state): State<AppState>,
    channel_id: Result<Path<String>, PathRejection>,
) -> Result<Json<ChannelDetail>, ApiError> {
    let Path(channel_id) = channel_id.map_err(|e| state.reject(e))?;
    let detail = relay::channel_statistics(state.youtube.as_ref(), &channel_id)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(detail))
}

#[axum::debug_handler]
#[instrument(name = "channel_videos", skip(state))]
pub async fn channel_videos(
    State(state): State<AppState>,
    channel_id: Result<Path<String>, PathRejection>,
    params: Result<Query<VideosParams>, QueryRejection>,
) -> Result<Json<ChannelVideos>, ApiError> {
    let Path(channel_id) = channel_id.map_err(|e| state.reject(e))?;
    let Query(params) = params.map_err(|e| state.reject(e))?;
    let page = relay::channel_videos(
        state.youtube.as_ref(),
        &channel_id,
        params.page_token.as_deref(),
    )
    .await
    .map_err(|e| state.reject(e))?;
    tracing::debug!(videos = page.videos.len(), "channel page done");
    Ok(Json(page))
}

#[axum::debug_handler]
#[instrument(name = "video_statistics", skip(state))]
pub async fn video_statistics(
    State(state): State<AppState>,
    video_id: Result<Path<String>, PathRejection>,
) -> Result<Json<VideoDetail>, ApiError> {
    let Path(video_id) = video_id.map_err(|e| state.reject(e))?;
    let video = relay::video_statistics(state.youtube.as_ref(), &video_id)
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(video))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[instrument(name = "health")]
pub async fn health() -> (StatusCode, Json<HealthResponse>) {
    let response = HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    };
    (StatusCode::OK, Json(response))
}
