use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use ordena_core::{ServiceError, ServiceResult};
use ordena_orders::SaleRecord;

use super::{error_message, http_client};

#[derive(Debug, Deserialize)]
struct GetSalesResponse {
    #[serde(default)]
    sales: Vec<SaleRecord>,
}

#[derive(Debug, Serialize)]
struct CloseSaleForm {
    sales_id: i64,
}

/// Client for the upstream online-store service.
#[derive(Debug, Clone)]
pub struct ShopClient {
    base_url: String,
    http: reqwest::Client,
}

impl ShopClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            base_url: base_url.into(),
            http: http_client(timeout),
        }
    }

    /// Fetch the list of currently open sales. An empty list is a normal
    /// outcome, not an error.
    pub async fn get_sales(&self) -> ServiceResult<Vec<SaleRecord>> {
        let url = format!("{}/get_sales", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| ServiceError::upstream(format!("online store unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(%status, "online store reported failure on get_sales");
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(ServiceError::upstream(error_message(
                &body,
                &format!("online store returned {status}"),
            )));
        }

        let body: GetSalesResponse = response
            .json()
            .await
            .map_err(|e| ServiceError::upstream(format!("malformed get_sales payload: {e}")))?;
        Ok(body.sales)
    }

    /// Notify the store that a sale has been ingested and should close.
    pub async fn close_sale(&self, sales_id: i64) -> ServiceResult<()> {
        let url = format!("{}/close_sale", self.base_url);
        let response = self
            .http
            .put(&url)
            .form(&CloseSaleForm { sales_id })
            .send()
            .await
            .map_err(|e| ServiceError::upstream(format!("online store unreachable: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let body: Value = response.json().await.unwrap_or(Value::Null);
            return Err(ServiceError::upstream(error_message(
                &body,
                &format!("online store returned {status}"),
            )));
        }

        Ok(())
    }
}
