//! Book error types.

use thiserror::Error;

/// Errors raised by the book's public operations.
///
/// The engine never retries and never logs above trace level: an operation
/// either succeeds, no-ops (unknown cancel ids), or returns one of these.
#[derive(Debug, Clone, PartialEq, Error)]
#[non_exhaustive]
pub enum BookError {
    /// A side label was neither `bid`/`buy` nor `ask`/`sell`.
    #[error("invalid side: {0:?}")]
    InvalidSide(String),

    /// Submitted order size was zero, negative, or not finite.
    #[error("invalid size: {size} (must be a positive finite quantity)")]
    InvalidSize {
        /// The rejected size.
        size: f64,
    },

    /// Submitted limit price was zero, negative, or not finite.
    #[error("invalid price: {price} (must be a positive finite price)")]
    InvalidPrice {
        /// The rejected price.
        price: f64,
    },
}
