use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

#[derive(Debug)]
pub enum HttpError {
    InvalidSignature,
    InvalidPayload(String),
    Internal(String),
}

impl From<backend_application::AppError> for HttpError {
    fn from(value: backend_application::AppError) -> Self {
        match value {
            backend_application::AppError::InvalidSignature => HttpError::InvalidSignature,
            backend_application::AppError::InvalidPayload(err) => {
                HttpError::InvalidPayload(err.to_string())
            }
            backend_application::AppError::Internal(err) => HttpError::Internal(err.to_string()),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            HttpError::InvalidSignature => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    status: "invalid signature",
                    error: None,
                },
            ),
            HttpError::InvalidPayload(msg) => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    status: "invalid payload",
                    error: Some(msg),
                },
            ),
            HttpError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorBody {
                    status: "error",
                    error: Some(msg),
                },
            ),
        };
        (status, Json(body)).into_response()
    }
}
