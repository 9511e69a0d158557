use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use panel_core::PanelError;
use serde_json::json;

/// HTTP rendering of a `PanelError`: `{"detail": message}` with a status
/// picked from the error category.
#[derive(Debug)]
pub struct ApiError(PanelError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        if self.0.is_invalid_input() {
            StatusCode::BAD_REQUEST
        } else if self.0.is_not_found() {
            StatusCode::NOT_FOUND
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<PanelError> for ApiError {
    fn from(err: PanelError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("[Api] {}", self.0);
        }
        (status, Json(json!({ "detail": self.0.to_string() }))).into_response()
    }
}
