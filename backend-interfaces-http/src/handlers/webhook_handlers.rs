use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::Serialize;

use backend_application::commands::webhook_commands::{self, WebhookStatus};
use backend_application::AppState;

use crate::error::HttpError;
use crate::middleware::extract_signature;

#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<u64>,
}

impl From<WebhookStatus> for WebhookAck {
    fn from(value: WebhookStatus) -> Self {
        match value {
            WebhookStatus::Success { order } => WebhookAck {
                status: "success",
                order: Some(order),
            },
            WebhookStatus::Duplicate { order } => WebhookAck {
                status: "duplicate",
                order: Some(order),
            },
            WebhookStatus::Ignored => WebhookAck {
                status: "ignored",
                order: None,
            },
        }
    }
}

/// The body is taken as raw bytes: the signature covers the exact wire form.
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>, HttpError> {
    let signature = extract_signature(&headers);
    let status = webhook_commands::handle_webhook(&state, &body, signature).await?;
    Ok(Json(status.into()))
}
