//! Typed error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (validation,
/// lifecycle rules, missing records). Transport and storage concerns belong
/// in [`ServiceError`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The requested order does not exist.
    #[error("The order {0} does not exist")]
    OrderNotFound(i64),

    /// The order was already transitioned to `Completed`.
    #[error("The order {0} is already completed")]
    AlreadyCompleted(i64),

    /// The pending-invoice listing found nothing to report.
    #[error("There are no pending orders")]
    NoPendingOrders,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Result type used by orchestration and infrastructure code.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level error: domain failures plus the non-deterministic kinds
/// (upstream collaborators, storage, everything else).
///
/// The HTTP boundary maps each kind to a status code; callers never have to
/// string-match messages to tell failure classes apart.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// An upstream collaborator (online store, ViaCEP) reported failure or
    /// was unreachable. The message carries the upstream text with any
    /// `"Error: "` prefix already stripped.
    #[error("{0}")]
    Upstream(String),

    /// The storage collaborator failed.
    #[error("storage failure: {0}")]
    Storage(String),

    /// Anything else (malformed payload, missing field, ...).
    #[error("{0}")]
    Internal(String),
}

impl ServiceError {
    /// Wrap an upstream failure message, stripping the legacy prefix the
    /// collaborators embed in their error bodies.
    pub fn upstream(msg: impl Into<String>) -> Self {
        let msg = msg.into();
        Self::Upstream(msg.strip_prefix("Error: ").unwrap_or(&msg).to_string())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
