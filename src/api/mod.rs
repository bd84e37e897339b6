pub mod handlers;

use std::sync::Arc;

use axum::Router;
use axum::http::{HeaderValue, Method, header::CONTENT_TYPE};
use axum::routing::get;
use tower_http::cors::CorsLayer;

use crate::error::{ApiError, RelayError, StatusPolicy};
use crate::yt::YouTubeApi;

#[derive(Clone)]
pub struct AppState {
    pub youtube: Arc<dyn YouTubeApi>,
    pub status_policy: StatusPolicy,
}

impl AppState {
    pub fn new(youtube: Arc<dyn YouTubeApi>, status_policy: StatusPolicy) -> Self {
        Self {
            youtube,
            status_policy,
        }
    }

    pub fn reject(&self, err: impl Into<RelayError>) -> ApiError {
        ApiError {
            source: err.into(),
            policy: self.status_policy,
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/channels/search", get(handlers::search_channels))
        .route("/api/channels/:channel_id", get(handlers::channel_statistics))
        .route("/api/channels/:channel_id/videos", get(handlers::channel_videos))
        .route("/api/videos/:video_id", get(handlers::video_statistics))
        .route("/api/health", get(handlers::health))
        .with_state(state)
}

pub fn cors_layer(origin: &str) -> anyhow::Result<CorsLayer> {
    let origin = origin.parse::<HeaderValue>()?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET])
        .allow_headers([CONTENT_TYPE]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::YtError;
    use crate::yt::types::{ChannelItem, SearchListResponse, VideoItem, VideosListResponse};
    use async_trait::async_trait;
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode};
    use serde_json::{Value, json};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tower::ServiceExt;

    #[derive(Default)]
    struct FakeYouTube {
        search_page: Option<Value>,
        channel: Option<Value>,
        videos: Option<Value>,
        fail_with: Option<fn() -> YtError>,
        details_calls: AtomicUsize,
        requested_ids: Mutex<Vec<String>>,
        page_tokens: Mutex<Vec<Option<String>>>,
    }

    impl FakeYouTube {
        fn fail(&self) -> Result<(), YtError> {
            match self.fail_with {
                Some(make) => Err(make()),
                None => Ok(()),
            }
        }
    }

    fn decode<T: serde::de::DeserializeOwned>(value: &Option<Value>) -> T {
        serde_json::from_value(value.clone().unwrap_or_else(|| json!({}))).unwrap()
    }

    #[async_trait]
    impl YouTubeApi for FakeYouTube {
        async fn search_channels(&self, _query: &str) -> Result<SearchListResponse, YtError> {
            self.fail()?;
            Ok(decode(&self.search_page))
        }

        async fn channel(&self, _channel_id: &str) -> Result<ChannelItem, YtError> {
            self.fail()?;
            match &self.channel {
                Some(_) => Ok(decode(&self.channel)),
                None => Err(YtError::NotFound("Channel not found".into())),
            }
        }

        async fn channel_videos(
            &self,
            _channel_id: &str,
            page_token: Option<&str>,
        ) -> Result<SearchListResponse, YtError> {
            self.fail()?;
            self.page_tokens
                .lock()
                .unwrap()
                .push(page_token.map(str::to_owned));
            Ok(decode(&self.search_page))
        }

        async fn videos_details(&self, video_ids: &[String]) -> Result<VideosListResponse, YtError> {
            self.details_calls.fetch_add(1, Ordering::SeqCst);
            self.requested_ids.lock().unwrap().extend_from_slice(video_ids);
            Ok(decode(&self.videos))
        }

        async fn video(&self, _video_id: &str) -> Result<VideoItem, YtError> {
            self.fail()?;
            let list: VideosListResponse = decode(&self.videos);
            list.items
                .into_iter()
                .next()
                .ok_or_else(|| YtError::NotFound("Video not found".into()))
        }
    }

    async fn fetch(
        fake: Arc<FakeYouTube>,
        policy: StatusPolicy,
        uri: &str,
    ) -> (StatusCode, Value) {
        let app = router(AppState::new(fake, policy));
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn search_preserves_upstream_order() {
        let fake = Arc::new(FakeYouTube {
            search_page: Some(json!({
                "items": [
                    {
                        "id": { "channelId": "UC1" },
                        "snippet": {
                            "title": "Lofi Girl",
                            "description": "beats to relax",
                            "thumbnails": { "default": { "url": "https://img/1" } }
                        }
                    },
                    {
                        "id": { "channelId": "UC2" },
                        "snippet": {
                            "title": "Chillhop",
                            "description": "",
                            "thumbnails": { "default": { "url": "https://img/2" } }
                        }
                    }
                ]
            })),
            ..Default::default()
        });

        let (status, body) = fetch(fake, StatusPolicy::AlwaysOk, "/api/channels/search?query=lofi").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "channels": [
                    { "id": "UC1", "title": "Lofi Girl", "description": "beats to relax", "thumbnailUrl": "https://img/1" },
                    { "id": "UC2", "title": "Chillhop", "description": "", "thumbnailUrl": "https://img/2" }
                ]
            })
        );
    }

    #[tokio::test]
    async fn search_without_query_is_bad_request() {
        let fake = Arc::new(FakeYouTube::default());
        let (status, body) = fetch(fake, StatusPolicy::AlwaysOk, "/api/channels/search").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({ "error": "Required request parameter 'query' is missing" })
        );
    }

    #[tokio::test]
    async fn channel_statistics_as_strings() {
        let fake = Arc::new(FakeYouTube {
            channel: Some(json!({
                "id": "UCabc",
                "snippet": {
                    "title": "Abc",
                    "description": "desc",
                    "publishedAt": "2012-01-01T00:00:00Z",
                    "thumbnails": { "default": { "url": "https://img/abc" } }
                },
                "statistics": { "subscriberCount": 100, "videoCount": 10, "viewCount": 5000 }
            })),
            ..Default::default()
        });

        let (status, body) = fetch(fake, StatusPolicy::AlwaysOk, "/api/channels/UCabc").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "id": "UCabc",
                "statistics": { "subscriberCount": "100", "videoCount": "10", "viewCount": "5000" },
                "details": {
                    "title": "Abc",
                    "description": "desc",
                    "publishedAt": "2012-01-01T00:00:00Z",
                    "thumbnailUrl": "https://img/abc"
                }
            })
        );
    }

    #[tokio::test]
    async fn channel_without_statistics_reads_zero() {
        let fake = Arc::new(FakeYouTube {
            channel: Some(json!({ "id": "UCbare" })),
            ..Default::default()
        });
        let (_, body) = fetch(fake, StatusPolicy::AlwaysOk, "/api/channels/UCbare").await;
        assert_eq!(
            body["statistics"],
            json!({ "subscriberCount": "0", "videoCount": "0", "viewCount": "0" })
        );
        assert_eq!(body["details"]["title"], "");
    }

    #[tokio::test]
    async fn channel_videos_fetches_details_for_listed_ids() {
        let fake = Arc::new(FakeYouTube {
            search_page: Some(json!({
                "nextPageToken": "CDIQAA",
                "pageInfo": { "totalResults": 321 },
                "items": [
                    { "id": { "videoId": "v2" } },
                    { "id": { "playlistId": "PLx" } },
                    { "id": { "videoId": "v1" } }
                ]
            })),
            videos: Some(json!({
                "items": [
                    {
                        "id": "v2",
                        "snippet": {
                            "title": "Second",
                            "description": "d2",
                            "publishedAt": "2024-02-02T00:00:00Z",
                            "thumbnails": { "default": { "url": "https://img/v2" } }
                        },
                        "statistics": { "viewCount": "20", "likeCount": "2", "commentCount": "1" },
                        "contentDetails": { "duration": "PT4M13S" }
                    },
                    { "id": "v1" }
                ]
            })),
            ..Default::default()
        });

        let (status, body) = fetch(
            fake.clone(),
            StatusPolicy::AlwaysOk,
            "/api/channels/UCabc/videos?pageToken=CAUQAA",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(fake.details_calls.load(Ordering::SeqCst), 1);
        assert_eq!(*fake.requested_ids.lock().unwrap(), vec!["v2", "v1"]);
        assert_eq!(
            *fake.page_tokens.lock().unwrap(),
            vec![Some("CAUQAA".to_owned())]
        );
        assert_eq!(body["nextPageToken"], "CDIQAA");
        assert_eq!(body["totalResults"], 321);
        assert_eq!(
            body["videos"][0],
            json!({
                "id": "v2",
                "statistics": { "viewCount": "20", "likeCount": "2", "commentCount": "1" },
                "title": "Second",
                "description": "d2",
                "publishedAt": "2024-02-02T00:00:00Z",
                "thumbnailUrl": "https://img/v2",
                "duration": "PT4M13S"
            })
        );
        assert_eq!(body["videos"][1]["statistics"]["likeCount"], "0");
    }

    #[tokio::test]
    async fn empty_channel_page_skips_detail_call() {
        let fake = Arc::new(FakeYouTube {
            search_page: Some(json!({ "pageInfo": { "totalResults": 0 }, "items": [] })),
            ..Default::default()
        });

        let (status, body) = fetch(fake.clone(), StatusPolicy::AlwaysOk, "/api/channels/UCnone/videos").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(fake.details_calls.load(Ordering::SeqCst), 0);
        assert_eq!(*fake.page_tokens.lock().unwrap(), vec![None]);
        assert_eq!(
            body,
            json!({ "videos": [], "nextPageToken": null, "totalResults": 0 })
        );
    }

    #[tokio::test]
    async fn video_statistics_shape() {
        let fake = Arc::new(FakeYouTube {
            videos: Some(json!({
                "items": [{
                    "id": "dQw4w9WgXcQ",
                    "snippet": {
                        "title": "Never Gonna",
                        "description": "",
                        "publishedAt": "2009-10-25T06:57:33Z",
                        "thumbnails": { "high": { "url": "https://img/high" } }
                    },
                    "statistics": { "viewCount": "1", "likeCount": "2", "commentCount": "3" },
                    "contentDetails": { "duration": "PT3M33S" }
                }]
            })),
            ..Default::default()
        });

        let (_, body) = fetch(fake, StatusPolicy::AlwaysOk, "/api/videos/dQw4w9WgXcQ").await;

        assert_eq!(
            body,
            json!({
                "id": "dQw4w9WgXcQ",
                "statistics": { "viewCount": "1", "likeCount": "2", "commentCount": "3" },
                "title": "Never Gonna",
                "description": "",
                "publishedAt": "2009-10-25T06:57:33Z",
                "thumbnailUrl": "https://img/high",
                "duration": "PT3M33S"
            })
        );
    }

    #[tokio::test]
    async fn every_route_renders_faults_as_error_body() {
        let routes = [
            "/api/channels/search?query=x",
            "/api/channels/UCabc",
            "/api/channels/UCabc/videos",
            "/api/videos/v1",
        ];
        for uri in routes {
            let fake = Arc::new(FakeYouTube {
                fail_with: Some(|| YtError::NotFound("Channel not found".into())),
                ..Default::default()
            });
            let (status, body) = fetch(fake, StatusPolicy::AlwaysOk, uri).await;
            assert_eq!(status, StatusCode::OK, "{uri}");
            assert_eq!(body, json!({ "error": "Channel not found" }), "{uri}");
        }
    }

    #[tokio::test]
    async fn strict_policy_sets_status() {
        let fake = Arc::new(FakeYouTube::default());
        let (status, body) = fetch(fake, StatusPolicy::Strict, "/api/videos/missing").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "error": "Video not found" }));

        let fake = Arc::new(FakeYouTube {
            fail_with: Some(|| YtError::Upstream {
                status: 403,
                message: "YouTube search.list failed (HTTP 403): quota".into(),
            }),
            ..Default::default()
        });
        let (status, body) = fetch(fake, StatusPolicy::Strict, "/api/channels/search?query=x").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body, json!({ "error": "YouTube search.list failed (HTTP 403): quota" }));
    }

    #[tokio::test]
    async fn malformed_input_renders_error_body() {
        let cases = [
            ("/api/channels/search?query=a&query=b", "duplicate field `query`"),
            ("/api/channels/UC/videos?pageToken=a&pageToken=b", "duplicate field `pageToken`"),
            ("/api/videos/%FF", "Invalid UTF-8"),
            ("/api/channels/%FF", "Invalid UTF-8"),
        ];
        for policy in [StatusPolicy::AlwaysOk, StatusPolicy::Strict] {
            for (uri, expected) in cases {
                let fake = Arc::new(FakeYouTube::default());
                let (status, body) = fetch(fake.clone(), policy, uri).await;
                assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
                let fields = body.as_object().unwrap();
                assert_eq!(fields.len(), 1, "{uri}: {body}");
                let message = fields["error"].as_str().unwrap();
                assert!(message.contains(expected), "{uri}: {message}");
                assert!(fake.page_tokens.lock().unwrap().is_empty());
            }
        }
    }

    #[tokio::test]
    async fn health_reports_version() {
        let fake = Arc::new(FakeYouTube::default());
        let (status, body) = fetch(fake, StatusPolicy::AlwaysOk, "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn cors_rejects_invalid_origin() {
        assert!(cors_layer("http://localhost:3000").is_ok());
        assert!(cors_layer("bad\norigin").is_err());
    }
}
