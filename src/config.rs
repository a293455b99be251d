use std::net::SocketAddr;

use anyhow::Context;
use serde::Deserialize;
use tracing::warn;

#[derive(Debug, Clone, Deserialize)]
pub struct SpoonacularConfig {
    pub api_key: String,
    pub base_url: String,
    pub results: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AicookConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub spoonacular: SpoonacularConfig,
    pub aicook: AicookConfig,
    pub upstream_timeout_secs: u64,
    pub app_host: String,
    pub app_port: u16,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = std::env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL is not set"))?;
        let spoonacular = SpoonacularConfig {
            api_key: secret("SPOONACULAR_API_KEY"),
            base_url: std::env::var("SPOONACULAR_BASE_URL")
                .unwrap_or_else(|_| "https://api.spoonacular.com".into()),
            results: parsed("SPOONACULAR_RESULTS", 10),
        };
        let aicook = AicookConfig {
            api_key: secret("AICOOK_API_KEY"),
            base_url: std::env::var("AICOOK_BASE_URL")
                .unwrap_or_else(|_| "https://detect.roboflow.com".into()),
            model: std::env::var("AICOOK_MODEL").unwrap_or_else(|_| "aicook-lcv4d/3".into()),
        };
        Ok(Self {
            database_url,
            spoonacular,
            aicook,
            upstream_timeout_secs: parsed("UPSTREAM_TIMEOUT_SECS", 15),
            app_host: std::env::var("APP_HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            app_port: parsed("APP_PORT", 8080),
        })
    }

    pub fn bind_addr(&self) -> anyhow::Result<SocketAddr> {
        format!("{}:{}", self.app_host, self.app_port)
            .parse()
            .with_context(|| format!("invalid APP_HOST {:?}", self.app_host))
    }
}

fn secret(key: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| {
        warn!("{key} not set, upstream calls will be rejected");
        String::new()
    })
}

fn parsed<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}
