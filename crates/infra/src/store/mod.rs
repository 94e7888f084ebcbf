//! Order storage.
//!
//! A single `orders` table behind the [`OrderStore`] trait: Postgres for the
//! real service, an in-memory twin for tests and local development. Every
//! call is an independent, immediately-committed operation; no transaction
//! ever spans two calls.

use async_trait::async_trait;
use thiserror::Error;

use ordena_core::ServiceError;
use ordena_orders::{InvoiceStatus, NewOrder, OrderRecord};

mod in_memory;
mod postgres;

pub use in_memory::InMemoryOrderStore;
pub use postgres::PgOrderStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend failure: {0}")]
    Backend(String),
}

impl From<StoreError> for ServiceError {
    fn from(err: StoreError) -> Self {
        ServiceError::storage(err.to_string())
    }
}

/// Storage collaborator for order records.
///
/// Orders are append-only apart from the one sanctioned mutation:
/// completing a pending invoice.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persist a new order with `Pending` invoice status, returning the
    /// stored row with its assigned identifier.
    async fn insert(&self, order: NewOrder) -> Result<OrderRecord, StoreError>;

    /// All orders with the given invoice status, in storage order.
    async fn list_by_status(&self, status: InvoiceStatus) -> Result<Vec<OrderRecord>, StoreError>;

    /// Current invoice status of an order, or `None` if no such order.
    async fn status_of(&self, order_id: i64) -> Result<Option<InvoiceStatus>, StoreError>;

    /// Atomically transition the order to `Completed` if and only if it is
    /// currently `Pending`. Returns whether a row was updated; `false`
    /// means the order is absent or already completed.
    async fn complete_pending(&self, order_id: i64) -> Result<bool, StoreError>;
}
