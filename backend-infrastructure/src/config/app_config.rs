use std::env;
use std::fmt::Display;
use std::net::SocketAddr;
use std::path::Path;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::Deserialize;
use tokio::fs;
use tracing::warn;

use backend_domain::{DbConfig, RuntimeConfig, StorageBackend};

use crate::config::validate_database_name;

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub bind_addr: String,
    pub webhook_secret: Option<String>,
    pub storage: StorageBackend,
    pub clickhouse_url: String,
    pub clickhouse_database: String,
    pub clickhouse_user: Option<String>,
    pub clickhouse_password: Option<String>,
    pub max_body_bytes: u64,
    pub request_timeout_seconds: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            webhook_secret: None,
            storage: StorageBackend::Clickhouse,
            clickhouse_url: "http://127.0.0.1:8123".to_string(),
            clickhouse_database: "payboard".to_string(),
            clickhouse_user: None,
            clickhouse_password: None,
            max_body_bytes: 1024 * 1024,
            request_timeout_seconds: 15,
        }
    }
}

impl AppConfig {
    pub async fn load() -> Result<Self> {
        let path = env::var("PAYBOARD_CONFIG").unwrap_or_else(|_| "./config.toml".to_string());
        let file_path = Path::new(&path);
        let mut config = if file_path.exists() {
            let content = fs::read_to_string(file_path).await?;
            toml::from_str(&content)?
        } else {
            warn!("{} not found, using defaults", path);
            AppConfig::default()
        };
        config.apply_env_overrides()?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    pub fn normalize(&mut self) {
        self.bind_addr = self.bind_addr.trim().to_string();
        self.clickhouse_database = self.clickhouse_database.trim().to_string();
        self.webhook_secret = non_blank(self.webhook_secret.take());
        self.clickhouse_user = non_blank(self.clickhouse_user.take());
        self.clickhouse_password = non_blank(self.clickhouse_password.take());
    }

    pub fn validate(&self) -> Result<()> {
        self.bind_addr
            .parse::<SocketAddr>()
            .map_err(|err| anyhow!("invalid bind_addr: {}", err))?;
        if self.webhook_secret.is_none() {
            return Err(anyhow!(
                "webhook_secret must be set (config file or PAYBOARD_WEBHOOK_SECRET)"
            ));
        }
        if self.max_body_bytes == 0 {
            return Err(anyhow!("max_body_bytes must be greater than 0"));
        }
        if self.request_timeout_seconds == 0 {
            return Err(anyhow!("request_timeout_seconds must be greater than 0"));
        }
        if self.storage == StorageBackend::Clickhouse {
            if self.clickhouse_url.trim().is_empty() {
                return Err(anyhow!("clickhouse_url must not be empty"));
            }
            validate_database_name(&self.clickhouse_database)
                .map_err(|err| anyhow!("invalid clickhouse_database: {}", err))?;
        }
        Ok(())
    }

    pub fn to_runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            bind_addr: self.bind_addr.clone(),
            max_body_bytes: self.max_body_bytes,
            request_timeout_seconds: self.request_timeout_seconds,
        }
    }

    pub fn to_db_config(&self) -> DbConfig {
        DbConfig {
            storage: self.storage,
            clickhouse_url: self.clickhouse_url.clone(),
            clickhouse_database: self.clickhouse_database.clone(),
            clickhouse_user: self.clickhouse_user.clone(),
            clickhouse_password: self.clickhouse_password.clone(),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(value) = env::var("PAYBOARD_BIND_ADDR") {
            self.bind_addr = value;
        }
        if let Ok(value) = env::var("PAYBOARD_PORT") {
            let port: u16 = parse_env("PAYBOARD_PORT", &value)?;
            self.bind_addr = with_port(&self.bind_addr, port);
        }
        if let Ok(value) = env::var("PAYBOARD_WEBHOOK_SECRET") {
            self.webhook_secret = Some(value);
        }
        if let Ok(value) = env::var("PAYBOARD_STORAGE") {
            self.storage = value.parse().map_err(|err: String| anyhow!(err))?;
        }
        if let Ok(value) = env::var("PAYBOARD_CLICKHOUSE_URL") {
            self.clickhouse_url = value;
        }
        if let Ok(value) = env::var("PAYBOARD_CLICKHOUSE_DATABASE") {
            self.clickhouse_database = value;
        }
        if let Ok(value) = env::var("PAYBOARD_CLICKHOUSE_USER") {
            self.clickhouse_user = Some(value);
        }
        if let Ok(value) = env::var("PAYBOARD_CLICKHOUSE_PASSWORD") {
            self.clickhouse_password = Some(value);
        }
        if let Ok(value) = env::var("PAYBOARD_MAX_BODY_BYTES") {
            self.max_body_bytes = parse_env("PAYBOARD_MAX_BODY_BYTES", &value)?;
        }
        if let Ok(value) = env::var("PAYBOARD_REQUEST_TIMEOUT_SECONDS") {
            self.request_timeout_seconds = parse_env("PAYBOARD_REQUEST_TIMEOUT_SECONDS", &value)?;
        }
        Ok(())
    }
}

/// Replaces the port of `bind_addr`, keeping its host. Falls back to all
/// interfaces when the current value has no usable host.
fn with_port(bind_addr: &str, port: u16) -> String {
    match bind_addr.parse::<SocketAddr>() {
        Ok(mut addr) => {
            addr.set_port(port);
            addr.to_string()
        }
        Err(_) => format!("0.0.0.0:{}", port),
    }
}

fn parse_env<T>(key: &str, value: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    value
        .trim()
        .parse()
        .map_err(|err| anyhow!("invalid {} '{}': {}", key, value, err))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|raw| {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_secret() -> AppConfig {
        AppConfig {
            webhook_secret: Some("whsec".to_string()),
            ..AppConfig::default()
        }
    }

    #[test]
    fn defaults_bind_all_interfaces_on_5000() {
        let config = AppConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:5000");
        assert_eq!(config.storage, StorageBackend::Clickhouse);
    }

    #[test]
    fn missing_secret_fails_validation() {
        let mut config = AppConfig {
            webhook_secret: Some("   ".to_string()),
            ..AppConfig::default()
        };
        config.normalize();
        assert!(config.webhook_secret.is_none());
        assert!(config.validate().is_err());
        assert!(with_secret().validate().is_ok());
    }

    #[test]
    fn invalid_bind_addr_and_body_limit_fail_validation() {
        let config = AppConfig {
            bind_addr: "not-an-addr".to_string(),
            ..with_secret()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            max_body_bytes: 0,
            ..with_secret()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_request_timeout_fails_validation() {
        let config = AppConfig {
            request_timeout_seconds: 0,
            ..with_secret()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            request_timeout_seconds: 1,
            ..with_secret()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn numeric_env_values_must_parse() {
        assert_eq!(parse_env::<u64>("PAYBOARD_MAX_BODY_BYTES", " 2048 ").ok(), Some(2048));
        assert!(parse_env::<u64>("PAYBOARD_MAX_BODY_BYTES", "1MiB").is_err());
        assert!(parse_env::<u64>("PAYBOARD_REQUEST_TIMEOUT_SECONDS", "-5").is_err());
        assert!(parse_env::<u16>("PAYBOARD_PORT", "70000").is_err());
    }

    #[test]
    fn database_name_is_only_checked_for_clickhouse() {
        let config = AppConfig {
            clickhouse_database: "bad name".to_string(),
            ..with_secret()
        };
        assert!(config.validate().is_err());

        let config = AppConfig {
            clickhouse_database: "bad name".to_string(),
            storage: StorageBackend::Memory,
            ..with_secret()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn toml_fields_fall_back_to_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
webhook_secret = "whsec"
storage = "memory"
"#,
        )
        .expect("parse");
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.bind_addr, "0.0.0.0:5000");
        assert_eq!(config.request_timeout_seconds, 15);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn port_override_keeps_host() {
        assert_eq!(with_port("0.0.0.0:5000", 8080), "0.0.0.0:8080");
        assert_eq!(with_port("127.0.0.1:5000", 9000), "127.0.0.1:9000");
        assert_eq!(with_port("garbage", 7000), "0.0.0.0:7000");
    }
}
