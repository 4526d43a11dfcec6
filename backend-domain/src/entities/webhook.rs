// Webhook entity
// Result of interpreting a verified processor callback

use crate::entities::PendingRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookDecision {
    Capture(PendingRecord),
    Ignored { event: String },
}
