use std::sync::Arc;

use anyhow::{anyhow, Result};
use clickhouse::Client;
use tracing::info;

use backend_application::{AppState, Metrics, SignatureVerifier};
use backend_domain::{DbConfig, RecordRepository, StorageBackend};
use backend_infrastructure::{AppConfig, ClickhouseRecordRepo, InMemoryRecordRepo};

pub struct AppContext {
    pub state: AppState,
}

impl AppContext {
    pub async fn new() -> Result<Self> {
        let config = AppConfig::load().await?;
        let runtime_config = config.to_runtime_config();
        let db_config = config.to_db_config();

        let secret = config
            .webhook_secret
            .as_deref()
            .ok_or_else(|| anyhow!("webhook_secret must be set"))?;
        let verifier = SignatureVerifier::new(secret)?;

        let record_repo = build_record_repo(&db_config);
        record_repo.open().await?;
        info!("storage backend: {}", db_config.storage);

        let state = AppState {
            config: runtime_config,
            record_repo,
            verifier: Arc::new(verifier),
            metrics: Arc::new(Metrics::default()),
        };

        Ok(Self { state })
    }
}

fn build_record_repo(db_config: &DbConfig) -> Arc<dyn RecordRepository> {
    match db_config.storage {
        StorageBackend::Clickhouse => {
            let mut clickhouse = Client::default().with_url(&db_config.clickhouse_url);
            if let Some(user) = &db_config.clickhouse_user {
                clickhouse = clickhouse.with_user(user);
            }
            if let Some(password) = &db_config.clickhouse_password {
                clickhouse = clickhouse.with_password(password);
            }
            Arc::new(ClickhouseRecordRepo::new(
                clickhouse,
                db_config.clickhouse_database.clone(),
            ))
        }
        StorageBackend::Memory => Arc::new(InMemoryRecordRepo::new()),
    }
}
