//! `ordena-core` — shared foundation for the order service.
//!
//! This crate contains **pure** building blocks (no IO, no HTTP, no storage):
//! the typed error model every other layer propagates.

pub mod error;

pub use error::{DomainError, DomainResult, ServiceError, ServiceResult};
