//! HTTP API application wiring (Axum router + service wiring).
//!
//! The folder is structured like:
//! - `services.rs`: the orchestration core (retrieval, enrichment,
//!   ingestion, invoice lifecycle) over injected collaborators
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

use crate::config::ApiConfig;
use services::AppServices;

/// Build the full HTTP router around an already-wired service set.
pub fn build_app(services: Arc<AppServices>) -> Router {
    routes::router().layer(Extension(services))
}

/// Wire collaborators from configuration (public entrypoint used by
/// `main.rs`).
pub async fn build_services(config: &ApiConfig) -> anyhow::Result<AppServices> {
    use ordena_infra::{InMemoryOrderStore, OrderStore, PgOrderStore};

    let store: Arc<dyn OrderStore> = match &config.database_url {
        Some(url) => Arc::new(PgOrderStore::connect(url).await?),
        None => Arc::new(InMemoryOrderStore::new()),
    };

    Ok(AppServices::new(store, config))
}
