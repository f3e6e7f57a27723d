use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::converter::ConvertError;

/// Body of every error response.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ConvertError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ConvertError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ConvertError::MalformedBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ConvertError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ConvertError {
    fn from(rejection: JsonRejection) -> Self {
        ConvertError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ConvertError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!("❌ {}", self);
        } else {
            tracing::warn!("   Rejected request ({}): {}", status, self);
        }

        (status, Json(ErrorResponse { detail: self.to_string() })).into_response()
    }
}
