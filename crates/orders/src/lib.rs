//! Orders domain module.
//!
//! This crate contains the business rules for sales orders — the persisted
//! order record, the loose upstream sale payload, and the Brazilian address
//! enrichment rules — implemented purely as deterministic domain logic
//! (no IO, no HTTP, no storage).

pub mod enrichment;
pub mod record;
pub mod sale;

pub use enrichment::{
    AddressColumn, ZipAddress, empty_address_columns, fill_empty_columns, is_brazilian,
};
pub use record::{InvoiceStatus, NewOrder, OrderRecord};
pub use sale::SaleRecord;
