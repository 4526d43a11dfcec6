// Payment record entity
// One row per captured payment, ranked by insertion order

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_NAME: &str = "Anonymous";
pub const DEFAULT_PLACE: &str = "Unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    pub payment_id: String,
    pub name: String,
    pub place: String,
    pub timestamp: DateTime<Utc>,
    pub order: u64,
}

/// A captured payment that has not been assigned an order yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRecord {
    pub payment_id: String,
    pub name: String,
    pub place: String,
    pub timestamp: DateTime<Utc>,
}

impl PendingRecord {
    pub fn with_order(self, order: u64) -> PaymentRecord {
        PaymentRecord {
            payment_id: self.payment_id,
            name: self.name,
            place: self.place,
            timestamp: self.timestamp,
            order,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted { order: u64 },
    /// The payment id was already recorded; `order` is the existing record's rank.
    Duplicate { order: u64 },
}
