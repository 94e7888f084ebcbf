//! Outbound HTTP gateways.
//!
//! Thin reqwest clients for the collaborators this service talks to: the
//! online store, the ViaCEP zip registry, and the service's own
//! sales-order endpoint (ingestion deliberately crosses that boundary over
//! HTTP rather than calling in-process).
//!
//! Every client carries an explicit request timeout; none of the upstreams
//! advertise one of their own.

use std::time::Duration;

use serde_json::Value;

mod sales_orders;
mod shop;
mod viacep;

pub use sales_orders::SalesOrderClient;
pub use shop::ShopClient;
pub use viacep::ViaCepClient;

pub(crate) fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        // Building only fails on TLS backend misconfiguration; with the
        // default backend this cannot happen at runtime.
        .unwrap_or_default()
}

/// Pull the human-readable `message` out of a collaborator error body.
pub(crate) fn error_message(body: &Value, fallback: &str) -> String {
    body.get("message")
        .and_then(Value::as_str)
        .unwrap_or(fallback)
        .to_string()
}
