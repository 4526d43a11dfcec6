use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use backend_domain::{InsertOutcome, PaymentRecord, PendingRecord, RecordRepository};

/// Process-local record store for development and tests. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryRecordRepo {
    records: Mutex<Vec<PaymentRecord>>,
    closed: AtomicBool,
}

impl InMemoryRecordRepo {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordRepository for InMemoryRecordRepo {
    async fn open(&self) -> Result<()> {
        info!("record store ready: in-memory");
        Ok(())
    }

    async fn insert(&self, record: PendingRecord) -> Result<InsertOutcome> {
        let mut records = self.records.lock().await;
        if self.closed.load(Ordering::Acquire) {
            return Err(anyhow!("record store is closed"));
        }
        if let Some(existing) = records
            .iter()
            .find(|existing| existing.payment_id == record.payment_id)
        {
            return Ok(InsertOutcome::Duplicate {
                order: existing.order,
            });
        }
        let order = records.len() as u64 + 1;
        records.push(record.with_order(order));
        Ok(InsertOutcome::Inserted { order })
    }

    async fn list_sorted_by_order(&self) -> Result<Vec<PaymentRecord>> {
        let mut rows = self.records.lock().await.clone();
        rows.sort_by_key(|record| record.order);
        Ok(rows)
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn close(&self) {
        let _records = self.records.lock().await;
        if !self.closed.swap(true, Ordering::AcqRel) {
            info!("record store closed");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::Utc;

    use super::*;

    fn pending(payment_id: &str) -> PendingRecord {
        PendingRecord {
            payment_id: payment_id.to_string(),
            name: "Alice".to_string(),
            place: "NYC".to_string(),
            timestamp: Utc::now(),
        }
    }

    #[tokio::test]
    async fn sequential_inserts_are_listed_in_order() {
        let repo = InMemoryRecordRepo::new();
        for i in 1..=5u64 {
            let outcome = repo.insert(pending(&format!("pay_{i}"))).await.expect("insert");
            assert_eq!(outcome, InsertOutcome::Inserted { order: i });
        }
        let rows = repo.list_sorted_by_order().await.expect("list");
        let orders: Vec<u64> = rows.iter().map(|row| row.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4, 5]);
        assert_eq!(rows[0].payment_id, "pay_1");
    }

    #[tokio::test]
    async fn duplicate_payment_id_is_not_inserted_twice() {
        let repo = InMemoryRecordRepo::new();
        repo.insert(pending("pay_a")).await.expect("insert");
        repo.insert(pending("pay_b")).await.expect("insert");
        let outcome = repo.insert(pending("pay_a")).await.expect("insert");
        assert_eq!(outcome, InsertOutcome::Duplicate { order: 1 });
        assert_eq!(repo.list_sorted_by_order().await.expect("list").len(), 2);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_keep_orders_dense() {
        let repo = Arc::new(InMemoryRecordRepo::new());
        let mut handles = Vec::new();
        for i in 0..64 {
            let repo = repo.clone();
            handles.push(tokio::spawn(async move {
                repo.insert(pending(&format!("pay_{i}"))).await
            }));
        }
        for handle in handles {
            handle.await.expect("join").expect("insert");
        }

        let orders: Vec<u64> = repo
            .list_sorted_by_order()
            .await
            .expect("list")
            .iter()
            .map(|row| row.order)
            .collect();
        assert_eq!(orders, (1..=64).collect::<Vec<u64>>());
    }

    #[tokio::test]
    async fn closed_store_refuses_inserts_but_serves_reads() {
        let repo = InMemoryRecordRepo::new();
        repo.insert(pending("pay_a")).await.expect("insert");
        repo.close().await;
        assert!(repo.insert(pending("pay_b")).await.is_err());
        assert_eq!(repo.list_sorted_by_order().await.expect("list").len(), 1);
    }

    #[tokio::test]
    async fn close_waits_for_queued_insert() {
        let repo = Arc::new(InMemoryRecordRepo::new());
        repo.insert(pending("pay_a")).await.expect("insert");

        let guard = repo.records.lock().await;
        let insert = tokio::spawn({
            let repo = repo.clone();
            async move { repo.insert(pending("pay_b")).await }
        });
        tokio::task::yield_now().await;
        let close = tokio::spawn({
            let repo = repo.clone();
            async move { repo.close().await }
        });
        tokio::task::yield_now().await;
        assert!(!close.is_finished());

        drop(guard);
        close.await.expect("join close");
        let len_at_close = repo.records.lock().await.len();
        let outcome = insert.await.expect("join insert").expect("insert");
        assert_eq!(outcome, InsertOutcome::Inserted { order: 2 });
        assert_eq!(len_at_close, 2);
        assert_eq!(repo.list_sorted_by_order().await.expect("list").len(), 2);
    }
}
