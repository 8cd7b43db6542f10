use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use database::error::RepositoryError;
use log::error;
use serde::Serialize;
use utoipa::ToSchema;

/// Body of every error response
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
}

/// Error returned by handlers
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match self {
            Self::NotFound(msg) | Self::BadRequest(msg) | Self::Conflict(msg) => msg,
            Self::Internal(msg) => {
                error!("Request failed: {msg}");
                msg
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(_) => Self::NotFound(err.to_string()),
            RepositoryError::Conflict(_) => Self::Conflict(err.to_string()),
            RepositoryError::ValidationError(_) => Self::BadRequest(err.to_string()),
            RepositoryError::ConnectionError(_)
            | RepositoryError::QueryError(_)
            | RepositoryError::InternalError(_) => Self::Internal(err.to_string()),
        }
    }
}
