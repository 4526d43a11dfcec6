use chrono::{DateTime, Utc};
use serde_json::Value;
use thiserror::Error;

use crate::entities::{PendingRecord, WebhookDecision, DEFAULT_NAME, DEFAULT_PLACE};
use crate::value_objects::WebhookEvent;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("malformed payload: {0}")]
    Malformed(String),
    #[error("missing field '{0}'")]
    MissingField(&'static str),
}

pub fn interpret_webhook(body: &[u8]) -> Result<WebhookDecision, PayloadError> {
    interpret_webhook_at(body, Utc::now())
}

/// Decides what a verified webhook body means. Only `payment.captured`
/// produces a record; the payment entity is not inspected for other events.
pub fn interpret_webhook_at(
    body: &[u8],
    received_at: DateTime<Utc>,
) -> Result<WebhookDecision, PayloadError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|err| PayloadError::Malformed(err.to_string()))?;
    if !value.is_object() {
        return Err(PayloadError::Malformed(
            "expected a JSON object".to_string(),
        ));
    }

    let event = value
        .get("event")
        .and_then(Value::as_str)
        .ok_or(PayloadError::MissingField("event"))?;
    if WebhookEvent::from(event) != WebhookEvent::PaymentCaptured {
        return Ok(WebhookDecision::Ignored {
            event: event.to_string(),
        });
    }

    let entity = value
        .pointer("/payload/payment/entity")
        .filter(|entity| entity.is_object())
        .ok_or(PayloadError::MissingField("payload.payment.entity"))?;
    let payment_id = entity
        .get("id")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or(PayloadError::MissingField("payload.payment.entity.id"))?;

    // Razorpay encodes "no notes" as an empty array.
    let notes = entity.get("notes");
    let name = note_text(notes, "name").unwrap_or(DEFAULT_NAME);
    let place = note_text(notes, "place").unwrap_or(DEFAULT_PLACE);

    Ok(WebhookDecision::Capture(PendingRecord {
        payment_id: payment_id.to_string(),
        name: name.to_string(),
        place: place.to_string(),
        timestamp: received_at,
    }))
}

fn note_text<'a>(notes: Option<&'a Value>, key: &str) -> Option<&'a str> {
    notes?
        .as_object()?
        .get(key)?
        .as_str()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}
