//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type StoreResult<T> = Result<T, StoreError>;

/// Domain-level error.
///
/// Every variant is a rejected request: the operation that returned it left
/// product and store state untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The amount was not a whole number (only reachable from text input).
    #[error("invalid amount {0:?}: amount must be a whole number")]
    InvalidAmountType(String),

    /// The amount was zero or negative.
    #[error("invalid amount {0}: amount must be greater than zero")]
    NonPositiveAmount(i64),

    /// The price was negative, not finite, or not a number at all.
    #[error("invalid price {0}: price must be a non-negative number")]
    InvalidPrice(String),

    /// No product with the given id is tracked by the store.
    #[error("product with id {0} not found")]
    ProductNotFound(String),

    /// A sale asked for more units than are in stock.
    #[error(
        "cannot sell {requested} {name}(s): only {available} remaining in stock"
    )]
    InsufficientStock {
        name: String,
        requested: u64,
        available: u64,
    },

    /// A value failed validation (e.g. blank name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A quantity or money computation did not fit its integer representation.
    #[error("arithmetic overflow: {0}")]
    Overflow(String),
}

impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_price(raw: impl ToString) -> Self {
        Self::InvalidPrice(raw.to_string())
    }

    pub fn not_found(id: impl ToString) -> Self {
        Self::ProductNotFound(id.to_string())
    }

    pub fn overflow(msg: impl Into<String>) -> Self {
        Self::Overflow(msg.into())
    }
}
