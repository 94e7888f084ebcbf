//! Orchestration core: the steps behind each endpoint, written against
//! injected collaborators so tests can substitute the store and upstreams.

use std::sync::Arc;

use serde_json::Value;

use ordena_core::{DomainError, ServiceResult};
use ordena_infra::{OrderStore, SalesOrderClient, ShopClient, ViaCepClient};
use ordena_orders::{
    OrderRecord, SaleRecord, ZipAddress, empty_address_columns, fill_empty_columns, is_brazilian,
};

use crate::config::ApiConfig;

/// Every collaborator the handlers need, wired once at startup.
pub struct AppServices {
    store: Arc<dyn OrderStore>,
    shop: ShopClient,
    viacep: ViaCepClient,
    sales_orders: SalesOrderClient,
}

impl AppServices {
    pub fn new(store: Arc<dyn OrderStore>, config: &ApiConfig) -> Self {
        Self {
            store,
            shop: ShopClient::new(&config.store_base_url, config.http_timeout),
            viacep: ViaCepClient::new(&config.viacep_base_url, config.http_timeout),
            sales_orders: SalesOrderClient::new(&config.self_base_url, config.http_timeout),
        }
    }

    /// Sales retrieval step: fetch open sales from the store and enrich
    /// each one in place, preserving order. An empty upstream list is a
    /// success.
    pub async fn enriched_open_sales(&self) -> ServiceResult<Vec<SaleRecord>> {
        let sales = self.shop.get_sales().await?;

        let mut enriched = Vec::with_capacity(sales.len());
        for mut sale in sales {
            self.enrich(&mut sale).await;
            enriched.push(sale);
        }
        Ok(enriched)
    }

    /// Address enrichment step. Best-effort: a failed or empty lookup
    /// leaves the sale as it arrived and is not an error.
    async fn enrich(&self, sale: &mut SaleRecord) {
        let empty = empty_address_columns(sale);
        if empty.is_empty() || !is_brazilian(sale) {
            return;
        }

        let zip_code = sale.zip_code.clone().unwrap_or_default();
        let data = match self.viacep.lookup(&zip_code).await {
            Ok(data) => data,
            Err(err) => {
                tracing::debug!(%zip_code, %err, "zip lookup failed; sale left unenriched");
                return;
            }
        };

        if !data.as_object().is_some_and(|m| !m.is_empty()) {
            return;
        }
        let Ok(address) = serde_json::from_value::<ZipAddress>(data) else {
            return;
        };

        fill_empty_columns(sale, &address, &empty);
    }

    /// Order ingestion step.
    ///
    /// Consumes the enriched sales list through the service's own HTTP
    /// endpoint, then per sale: persist the order, then report closure to
    /// the store. The record is committed *before* the close-sale
    /// callback; a callback failure aborts the rest of the batch but rolls
    /// nothing back, so items before (and including) the failing one stay
    /// persisted.
    pub async fn ingest_orders(&self) -> ServiceResult<Vec<OrderRecord>> {
        let sales = self.sales_orders.fetch_enriched().await?;

        let mut added = Vec::with_capacity(sales.len());
        for sale in sales {
            let sales_id = sale.sales_id_as_int()?;
            let record = self.store.insert(sale.into_new_order(sales_id)).await?;
            tracing::info!(order_id = record.order_id, sales_id, "order persisted");
            added.push(record);

            self.shop.close_sale(sales_id).await?;
        }
        Ok(added)
    }

    /// Invoice lifecycle: list pending orders. Zero pending records is a
    /// domain failure, not an empty success.
    pub async fn pending_invoices(&self) -> ServiceResult<Vec<OrderRecord>> {
        let pending = self
            .store
            .list_by_status(ordena_orders::InvoiceStatus::Pending)
            .await?;
        if pending.is_empty() {
            return Err(DomainError::NoPendingOrders.into());
        }
        Ok(pending)
    }

    /// Invoice lifecycle: transition one order to `Completed`.
    ///
    /// The transition is a single conditional update; the follow-up read
    /// only decides which error to report when nothing was updated.
    pub async fn complete_order(&self, order_id: i64) -> ServiceResult<()> {
        if self.store.complete_pending(order_id).await? {
            tracing::info!(order_id, "order completed");
            return Ok(());
        }

        match self.store.status_of(order_id).await? {
            None => Err(DomainError::OrderNotFound(order_id).into()),
            Some(ordena_orders::InvoiceStatus::Completed) => {
                Err(DomainError::AlreadyCompleted(order_id).into())
            }
            // The conditional update missed a row that now reads Pending:
            // another writer touched it between our two statements.
            Some(ordena_orders::InvoiceStatus::Pending) => Err(ordena_core::ServiceError::storage(
                format!("order {order_id} changed concurrently during completion"),
            )),
        }
    }

    /// ViaCEP proxy lookup used by `/get_viacep/`.
    pub async fn viacep_lookup(&self, zip_code: &str) -> ServiceResult<Value> {
        self.viacep.lookup(zip_code).await
    }
}
