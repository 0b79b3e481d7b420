//! # Application configuration
//!
//! TOML file plus environment overrides. Secrets (JWT secret, storage
//! access key) are normally provided through the environment and never
//! logged.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub storage: StorageConfig,
    pub currency: CurrencyConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub enable_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 3000,
            enable_cors: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Connection timeout in seconds.
    pub connect_timeout: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://data/agro_catalog.db?mode=rwc".to_string(),
            max_connections: 10,
            connect_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt_secret: String,
    /// Token lifetime in seconds; re-login is required after expiry.
    pub jwt_expires_in: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            jwt_expires_in: 86_400, // 1 day
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Storage gateway endpoint used for PUT/DELETE.
    pub endpoint: String,
    pub access_key: String,
    /// Public base from which stored objects are served.
    pub public_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            access_key: String::new(),
            public_url: String::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CurrencyConfig {
    /// Third-party rate API proxied by `GET /currency`.
    pub url: String,
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            url: "https://sqb.uz/api/site-kurs-api/".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from an optional TOML file, then apply
    /// environment overrides.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = match path {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read config file {}", path.display()))?;
                toml::from_str(&raw)
                    .with_context(|| format!("failed to parse config file {}", path.display()))?
            }
            None => Self::default(),
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("DATABASE_URL") {
            self.database.url = url;
        }
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Ok(raw) = std::env::var("JWT_EXPIRATION_TIME")
            && let Ok(seconds) = raw.parse()
        {
            self.auth.jwt_expires_in = seconds;
        }
        if let Ok(endpoint) = std::env::var("STORAGE_ENDPOINT") {
            self.storage.endpoint = endpoint;
        }
        if let Ok(key) = std::env::var("STORAGE_ACCESS_KEY") {
            self.storage.access_key = key;
        }
        if let Ok(url) = std::env::var("STORAGE_PUBLIC_URL") {
            self.storage.public_url = url;
        }
        if let Ok(url) = std::env::var("CURRENCY_API_URL") {
            self.currency.url = url;
        }
    }

    /// Startup validation: a running server must have a signing secret.
    pub fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            !self.auth.jwt_secret.is_empty(),
            "JWT_SECRET is not set (config [auth].jwt_secret or environment)"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.auth.jwt_expires_in, 86_400);
        assert!(config.currency.url.contains("sqb.uz"));
    }

    #[test]
    fn missing_secret_fails_validation() {
        let config = AppConfig::default();
        assert!(config.validate().is_err());
    }
}
