//! Error Types

use thiserror::Error;

/// Result type alias for order construction
pub type Result<T> = std::result::Result<T, OrderError>;

/// Errors produced while turning an untrusted cart into a trusted order
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OrderError {
    /// Cart was empty or missing
    #[error("Cart is empty")]
    EmptyCart,

    /// Quantity was zero, negative, or not an integer
    #[error("Invalid quantity for product {0}")]
    InvalidQuantity(String),

    /// Product id has no catalog entry (client/server desynchronization)
    #[error("Unknown product {0}")]
    UnknownProduct(String),

    /// Every line validated but the order total came out non-positive
    #[error("Order total is not positive")]
    NonPositiveTotal,

    /// Catalog construction or loading failed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl OrderError {
    /// Whether the error was caused by client input (HTTP 400 class)
    pub fn is_client_fault(&self) -> bool {
        !matches!(self, OrderError::Config(_))
    }
}
