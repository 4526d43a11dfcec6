use async_trait::async_trait;

use crate::entities::{InsertOutcome, PaymentRecord, PendingRecord};

#[async_trait]
pub trait RecordRepository: Send + Sync {
    /// Prepares the backing storage. Called once before the server accepts requests.
    async fn open(&self) -> anyhow::Result<()>;

    /// Appends a record with `order = count + 1`. Count and write happen
    /// atomically with respect to other inserts on the same handle.
    async fn insert(&self, record: PendingRecord) -> anyhow::Result<InsertOutcome>;

    async fn list_sorted_by_order(&self) -> anyhow::Result<Vec<PaymentRecord>>;

    async fn ping(&self) -> anyhow::Result<()>;

    /// Refuses further inserts. Reads keep working so in-flight requests can drain.
    async fn close(&self);
}
