use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
pub struct Metrics {
    webhooks_received: AtomicU64,
    records_inserted: AtomicU64,
    duplicate_deliveries: AtomicU64,
    ignored_events: AtomicU64,
    signature_rejections: AtomicU64,
    payload_rejections: AtomicU64,
    store_errors: AtomicU64,
}

impl Metrics {
    pub fn record_webhook(&self) {
        self.webhooks_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_insert(&self) {
        self.records_inserted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate(&self) {
        self.duplicate_deliveries.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_ignored(&self) {
        self.ignored_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_signature_rejection(&self) {
        self.signature_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_payload_rejection(&self) {
        self.payload_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_store_error(&self) {
        self.store_errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn render_prometheus(&self) -> String {
        let received = self.webhooks_received.load(Ordering::Relaxed);
        let inserted = self.records_inserted.load(Ordering::Relaxed);
        let duplicates = self.duplicate_deliveries.load(Ordering::Relaxed);
        let ignored = self.ignored_events.load(Ordering::Relaxed);
        let bad_signatures = self.signature_rejections.load(Ordering::Relaxed);
        let bad_payloads = self.payload_rejections.load(Ordering::Relaxed);
        let store_errors = self.store_errors.load(Ordering::Relaxed);

        format!(
            "# TYPE payboard_webhooks_received_total counter\n\
payboard_webhooks_received_total {}\n\
# TYPE payboard_records_inserted_total counter\n\
payboard_records_inserted_total {}\n\
# TYPE payboard_duplicate_deliveries_total counter\n\
payboard_duplicate_deliveries_total {}\n\
# TYPE payboard_ignored_events_total counter\n\
payboard_ignored_events_total {}\n\
# TYPE payboard_signature_rejections_total counter\n\
payboard_signature_rejections_total {}\n\
# TYPE payboard_payload_rejections_total counter\n\
payboard_payload_rejections_total {}\n\
# TYPE payboard_store_errors_total counter\n\
payboard_store_errors_total {}\n",
            received, inserted, duplicates, ignored, bad_signatures, bad_payloads, store_errors
        )
    }
}
