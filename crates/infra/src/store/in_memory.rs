use std::sync::RwLock;

use async_trait::async_trait;

use ordena_orders::{InvoiceStatus, NewOrder, OrderRecord};

use super::{OrderStore, StoreError};

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    rows: Vec<OrderRecord>,
}

/// In-memory order store.
///
/// Intended for tests/dev. Identifiers are assigned sequentially from 1,
/// matching the serial column of the Postgres store.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    inner: RwLock<Inner>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn insert(&self, order: NewOrder) -> Result<OrderRecord, StoreError> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        inner.next_id += 1;
        let record = OrderRecord::from_new(inner.next_id, order);
        inner.rows.push(record.clone());
        Ok(record)
    }

    async fn list_by_status(&self, status: InvoiceStatus) -> Result<Vec<OrderRecord>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(inner
            .rows
            .iter()
            .filter(|r| r.invoice_status == status)
            .cloned()
            .collect())
    }

    async fn status_of(&self, order_id: i64) -> Result<Option<InvoiceStatus>, StoreError> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        Ok(inner
            .rows
            .iter()
            .find(|r| r.order_id == order_id)
            .map(|r| r.invoice_status))
    }

    async fn complete_pending(&self, order_id: i64) -> Result<bool, StoreError> {
        // Single compare-and-set under one write lock, mirroring the
        // conditional UPDATE of the Postgres store.
        let mut inner = self
            .inner
            .write()
            .map_err(|_| StoreError::Backend("lock poisoned".to_string()))?;
        match inner
            .rows
            .iter_mut()
            .find(|r| r.order_id == order_id && r.invoice_status == InvoiceStatus::Pending)
        {
            Some(row) => {
                row.invoice_status = InvoiceStatus::Completed;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
