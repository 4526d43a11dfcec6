use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use clickhouse::{Client, Row};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::info;

use backend_domain::{InsertOutcome, PaymentRecord, PendingRecord, RecordRepository};

use crate::utils::{chrono_to_offset, offset_to_chrono};

const TABLE: &str = "payment_records";

#[derive(Debug, Clone, Serialize, Deserialize, Row)]
pub struct PaymentRecordRow {
    pub payment_id: String,
    pub name: String,
    pub place: String,
    #[serde(with = "clickhouse::serde::time::datetime64::millis")]
    pub captured_at: OffsetDateTime,
    pub display_order: u64,
}

impl PaymentRecordRow {
    fn from_pending(record: PendingRecord, display_order: u64) -> Self {
        Self {
            payment_id: record.payment_id,
            name: record.name,
            place: record.place,
            captured_at: chrono_to_offset(record.timestamp),
            display_order,
        }
    }

    fn into_record(self) -> PaymentRecord {
        PaymentRecord {
            payment_id: self.payment_id,
            name: self.name,
            place: self.place,
            timestamp: offset_to_chrono(self.captured_at),
            order: self.display_order,
        }
    }
}

/// ClickHouse-backed record store.
///
/// ClickHouse has no transactions, so count-then-insert is serialized by
/// `insert_lock`. This holds as long as a single process owns the table.
pub struct ClickhouseRecordRepo {
    client: Client,
    database: String,
    insert_lock: Mutex<()>,
    closed: AtomicBool,
}

impl ClickhouseRecordRepo {
    pub fn new(client: Client, database: String) -> Self {
        Self {
            client,
            database,
            insert_lock: Mutex::new(()),
            closed: AtomicBool::new(false),
        }
    }

    fn table(&self) -> String {
        format!("{}.{}", self.database, TABLE)
    }
}

fn schema_statements(database: &str) -> [String; 2] {
    [
        format!("CREATE DATABASE IF NOT EXISTS {}", database),
        format!(
            r#"
CREATE TABLE IF NOT EXISTS {}.{} (
    payment_id String,
    name String,
    place String,
    captured_at DateTime64(3, 'UTC'),
    display_order UInt64
) ENGINE = MergeTree
ORDER BY display_order
"#,
            database, TABLE
        ),
    ]
}

#[async_trait]
impl RecordRepository for ClickhouseRecordRepo {
    async fn open(&self) -> Result<()> {
        for statement in schema_statements(&self.database) {
            self.client.query(&statement).execute().await?;
        }
        info!("record store ready: clickhouse table {}", self.table());
        Ok(())
    }

    async fn insert(&self, record: PendingRecord) -> Result<InsertOutcome> {
        let table = self.table();
        let _guard = self.insert_lock.lock().await;
        if self.closed.load(Ordering::Acquire) {
            return Err(anyhow!("record store is closed"));
        }

        let existing = self
            .client
            .query(&format!(
                "SELECT display_order FROM {} WHERE payment_id = ? LIMIT 1",
                table
            ))
            .bind(record.payment_id.as_str())
            .fetch_all::<u64>()
            .await?;
        if let Some(order) = existing.into_iter().next() {
            return Ok(InsertOutcome::Duplicate { order });
        }

        let count: u64 = self
            .client
            .query(&format!("SELECT count() FROM {}", table))
            .fetch_one()
            .await?;
        let order = count + 1;

        let mut insert = self.client.insert::<PaymentRecordRow>(&table)?;
        insert
            .write(&PaymentRecordRow::from_pending(record, order))
            .await?;
        insert.end().await?;
        Ok(InsertOutcome::Inserted { order })
    }

    async fn list_sorted_by_order(&self) -> Result<Vec<PaymentRecord>> {
        let query = format!(
            "SELECT payment_id, name, place, captured_at, display_order FROM {} ORDER BY display_order ASC",
            self.table()
        );
        let rows = self
            .client
            .query(&query)
            .fetch_all::<PaymentRecordRow>()
            .await?;
        Ok(rows.into_iter().map(PaymentRecordRow::into_record).collect())
    }

    async fn ping(&self) -> Result<()> {
        let _: u8 = self.client.query("SELECT toUInt8(1)").fetch_one().await?;
        Ok(())
    }

    async fn close(&self) {
        // Inserts check the flag under the same lock.
        let _guard = self.insert_lock.lock().await;
        if !self.closed.swap(true, Ordering::AcqRel) {
            info!("record store closed");
        }
    }
}
