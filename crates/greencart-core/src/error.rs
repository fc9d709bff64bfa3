//! Error types for GreenCart

use thiserror::Error;

/// Main error type for GreenCart operations
#[derive(Debug, Error)]
pub enum GreenCartError {
    /// A line item carried a non-positive quantity.
    ///
    /// Rejected eagerly by the aggregator and the optimizer rather than
    /// silently treated as zero.
    #[error("invalid line item '{product_id}': quantity must be positive, got {quantity}")]
    InvalidLineItem { product_id: String, quantity: f64 },

    /// No footprint entry matched and the store has no default fallback.
    ///
    /// This is a configuration error, not a runtime-data error: a store
    /// meant for open-ended catalogs must be loaded with a default.
    #[error("no footprint for '{0}' and the store has no default fallback")]
    UnresolvableProduct(String),

    /// Invalid construction input (negative factors, bad weights, ...)
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for GreenCart operations
pub type Result<T> = std::result::Result<T, GreenCartError>;
