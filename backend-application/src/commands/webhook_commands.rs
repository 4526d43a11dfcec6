use tracing::{debug, error, info, warn};

use backend_domain::{interpret_webhook, InsertOutcome, WebhookDecision};

use crate::{AppError, AppState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookStatus {
    Success { order: u64 },
    Duplicate { order: u64 },
    Ignored,
}

/// Verifies, interprets and records a processor callback. `body` must be the
/// raw request bytes; `signature` is the `X-Razorpay-Signature` header value.
pub async fn handle_webhook(
    state: &AppState,
    body: &[u8],
    signature: Option<&str>,
) -> Result<WebhookStatus, AppError> {
    state.metrics.record_webhook();

    if !state.verifier.verify(body, signature) {
        state.metrics.record_signature_rejection();
        warn!(
            "rejected webhook: {} signature",
            if signature.is_some() { "invalid" } else { "missing" }
        );
        return Err(AppError::InvalidSignature);
    }

    let pending = match interpret_webhook(body) {
        Ok(WebhookDecision::Capture(pending)) => pending,
        Ok(WebhookDecision::Ignored { event }) => {
            state.metrics.record_ignored();
            debug!("ignored webhook event '{}'", event);
            return Ok(WebhookStatus::Ignored);
        }
        Err(err) => {
            state.metrics.record_payload_rejection();
            warn!("rejected webhook payload: {}", err);
            return Err(err.into());
        }
    };

    let payment_id = pending.payment_id.clone();
    match state.record_repo.insert(pending).await {
        Ok(InsertOutcome::Inserted { order }) => {
            state.metrics.record_insert();
            info!("recorded payment {} at order {}", payment_id, order);
            Ok(WebhookStatus::Success { order })
        }
        Ok(InsertOutcome::Duplicate { order }) => {
            state.metrics.record_duplicate();
            info!(
                "duplicate delivery for payment {} (already at order {})",
                payment_id, order
            );
            Ok(WebhookStatus::Duplicate { order })
        }
        Err(err) => {
            state.metrics.record_store_error();
            error!("failed to record payment {}: {}", payment_id, err);
            Err(AppError::Internal(err))
        }
    }
}
