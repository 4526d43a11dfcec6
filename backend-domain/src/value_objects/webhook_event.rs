// Webhook event value object

pub const PAYMENT_CAPTURED: &str = "payment.captured";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookEvent {
    PaymentCaptured,
    Other(String),
}

impl From<&str> for WebhookEvent {
    fn from(s: &str) -> Self {
        match s {
            PAYMENT_CAPTURED => WebhookEvent::PaymentCaptured,
            other => WebhookEvent::Other(other.to_string()),
        }
    }
}
