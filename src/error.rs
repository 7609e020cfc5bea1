use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use thiserror::Error;
use tracing::{error, warn};

use crate::db::StoreError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("please provide payload")]
    MissingPayload,

    #[error("problem with payload")]
    MalformedPayload(#[source] serde_json::Error),

    #[error("Payload is empty")]
    EmptyPayload,

    #[error("payload contain empty values")]
    InvalidPayload,

    #[error("could not read id from input")]
    InvalidId(#[source] uuid::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingPayload | AppError::InvalidPayload => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::MalformedPayload(_) | AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
            AppError::EmptyPayload => StatusCode::EXPECTATION_FAILED,
            AppError::Store(StoreError::NotFound { .. }) => StatusCode::NOT_FOUND,
            AppError::Store(StoreError::DuplicateKey { .. }) => StatusCode::CONFLICT,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Bodies are bare JSON strings; server-side failures are not echoed to the client.
        let message = match &self {
            AppError::MalformedPayload(e) => {
                warn!("could not parse request body: {}", e);
                self.to_string()
            }
            AppError::InvalidId(e) => {
                warn!("could not parse course id: {}", e);
                self.to_string()
            }
            AppError::Store(e) if status.is_server_error() => {
                error!("store error: {}", e);
                "oops something went wrong".to_string()
            }
            other => {
                warn!("request rejected: {}", other);
                other.to_string()
            }
        };

        (status, Json(message)).into_response()
    }
}
