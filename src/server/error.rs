use crate::model::{CoreError, FetchError, RankError};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;
use tracing::warn;

/// Failure of a request handler, translated into an HTTP status and a JSON body.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Rank(#[from] RankError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) | ApiError::Core(CoreError::EmptyInput) => StatusCode::NOT_FOUND,
            ApiError::Core(CoreError::MalformedInput(_)) => StatusCode::BAD_GATEWAY,
            ApiError::Core(CoreError::InvalidParameter(_) | CoreError::Entropy(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Fetch(FetchError::Timeout) | ApiError::Rank(RankError::Unreachable) => {
                StatusCode::GATEWAY_TIMEOUT
            }
            ApiError::Fetch(_) | ApiError::Rank(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            warn!("Request failed [{}]: {}", status, self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
