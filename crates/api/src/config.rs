//! Environment-variable configuration for the service binary.

use std::time::Duration;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Address the HTTP server binds to.
    pub bind_addr: String,
    /// Postgres connection string. Absent selects the in-memory store
    /// (dev/test mode).
    pub database_url: Option<String>,
    /// Base URL of the upstream online-store service.
    pub store_base_url: String,
    /// Base URL of the ViaCEP provider.
    pub viacep_base_url: String,
    /// Base URL under which this service reaches its own
    /// `/get_sales_order` endpoint during ingestion.
    pub self_base_url: String,
    /// Timeout applied to every outbound HTTP call.
    pub http_timeout: Duration,
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let database_url = std::env::var("DATABASE_URL").ok();
        if database_url.is_none() {
            tracing::warn!("DATABASE_URL not set; orders will be kept in memory only");
        }

        let http_timeout = std::env::var("HTTP_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or(Duration::from_secs(30));

        Self {
            bind_addr: env_or("BIND_ADDR", "0.0.0.0:5001"),
            database_url,
            store_base_url: env_or("STORE_BASE_URL", "http://online-store-microservice:5000"),
            viacep_base_url: env_or("VIACEP_BASE_URL", "https://viacep.com.br"),
            self_base_url: env_or("SELF_BASE_URL", "http://127.0.0.1:5001"),
            http_timeout,
        }
    }
}
