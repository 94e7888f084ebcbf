//! `ordena-infra` — IO adapters for the order service.
//!
//! Storage (`OrderStore` with Postgres and in-memory implementations) and
//! the outbound HTTP gateways (online store, ViaCEP, and the service's own
//! sales-order endpoint).

pub mod gateways;
pub mod store;

pub use gateways::{SalesOrderClient, ShopClient, ViaCepClient};
pub use store::{InMemoryOrderStore, OrderStore, PgOrderStore, StoreError};
