//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type StockResult<T> = Result<T, StockError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// stock invariants, authorization). Store failures surface as
/// `PersistenceUnavailable` at the service boundary and are never retried
/// internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StockError {
    /// No component exists with the given identifier.
    #[error("component not found")]
    ComponentNotFound,

    /// A movement quantity of zero was submitted (movement quantities are
    /// strictly positive).
    #[error("invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// A movement was submitted without a reason.
    #[error("a reason is required for every stock movement")]
    MissingReason,

    /// An outward movement would drive the stored quantity below zero.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { requested: u32, available: u32 },

    /// No notification exists with the given identifier.
    #[error("notification not found")]
    NotificationNotFound,

    /// No user exists with the given identifier.
    #[error("user not found")]
    UserNotFound,

    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// The acting user's role does not grant the required capability.
    #[error("unauthorized")]
    Unauthorized,

    /// Credential check failed (unknown username or wrong secret).
    #[error("authentication failed")]
    AuthenticationFailed,

    /// The entity store could not be read or written.
    #[error("persistence unavailable: {0}")]
    PersistenceUnavailable(String),
}

impl StockError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::PersistenceUnavailable(msg.into())
    }
}
