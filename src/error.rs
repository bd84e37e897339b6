use axum::Json;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Failure of a single upstream call.
#[derive(Debug, thiserror::Error)]
pub enum YtError {
    #[error("{0}")]
    NotFound(String),

    #[error("{message}")]
    Upstream { status: u16, message: String },

    #[error("YouTube request failed: {0}")]
    Transport(reqwest::Error),

    #[error("YouTube response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for YtError {
    fn from(err: reqwest::Error) -> Self {
        // The request URL carries the API key.
        Self::Transport(err.without_url())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error(transparent)]
    YouTube(#[from] YtError),

    #[error("Required request parameter '{0}' is missing")]
    MissingParameter(&'static str),

    #[error("{0}")]
    BadRequest(String),
}

impl From<QueryRejection> for RelayError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for RelayError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

/// How faults map onto HTTP status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusPolicy {
    /// Faults are reported in the body only, with `200 OK`.
    #[default]
    AlwaysOk,
    /// Not-found becomes `404`, every other upstream fault `502`.
    Strict,
}

impl RelayError {
    pub fn status_code(&self, policy: StatusPolicy) -> StatusCode {
        match (self, policy) {
            (Self::MissingParameter(_) | Self::BadRequest(_), _) => StatusCode::BAD_REQUEST,
            (Self::YouTube(_), StatusPolicy::AlwaysOk) => StatusCode::OK,
            (Self::YouTube(YtError::NotFound(_)), StatusPolicy::Strict) => StatusCode::NOT_FOUND,
            (Self::YouTube(_), StatusPolicy::Strict) => StatusCode::BAD_GATEWAY,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

/// A [`RelayError`] bound to the status policy it should be rendered with.
#[derive(Debug)]
pub struct ApiError {
    pub source: RelayError,
    pub policy: StatusPolicy,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self.source {
            RelayError::YouTube(YtError::NotFound(_))
            | RelayError::MissingParameter(_)
            | RelayError::BadRequest(_) => {
                tracing::warn!(error = %self.source, "request rejected");
            }
            RelayError::YouTube(_) => {
                tracing::error!(error = %self.source, "upstream call failed");
            }
        }
        let body = ErrorBody {
            error: self.source.to_string(),
        };
        (self.source.status_code(self.policy), Json(body)).into_response()
    }
}
