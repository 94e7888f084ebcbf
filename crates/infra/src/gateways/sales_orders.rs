use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;

use ordena_core::{ServiceError, ServiceResult};
use ordena_orders::SaleRecord;

use super::{error_message, http_client};

#[derive(Debug, Deserialize)]
struct SalesOrderResponse {
    #[serde(default)]
    sales_data: Vec<SaleRecord>,
}

/// Client for this service's own `/get_sales_order` endpoint.
///
/// Ingestion consumes the enrichment step across the HTTP boundary instead
/// of calling it in-process; the two steps are deployable as separate
/// services and this hop keeps that seam real.
#[derive(Debug, Clone)]
pub struct SalesOrderClient {
    base_url: String,
    http: reqwest::Client,
}

impl SalesOrderClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            http: http_client(timeout),
        }
    }

    /// Fetch the enriched open sales list.
    pub async fn fetch_enriched(&self) -> ServiceResult<Vec<SaleRecord>> {
        let url = format!("{}/get_sales_order", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::upstream(format!("sales-order endpoint unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(ServiceError::upstream(error_message(
                &body,
                &format!("sales-order endpoint returned {status}"),
            )));
        }

        let body: SalesOrderResponse = response.json().await.map_err(|e| {
            ServiceError::upstream(format!("malformed sales-order payload: {e}"))
        })?;
        Ok(body.sales_data)
    }
}
