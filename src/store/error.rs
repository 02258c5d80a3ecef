//! Domain errors raised by the stores and the transaction engine.

use thiserror::Error;

use crate::store::types::{CartId, ProductId};

/// Errors a store operation can report back to a client.
///
/// None of these close the connection; the dispatcher turns them into an
/// error envelope on the same stream.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShopError {
    /// No product with this id in the catalog.
    #[error("Product not found")]
    ProductNotFound(ProductId),

    /// No open cart with this id (never created, or already checked out).
    #[error("Cart not found")]
    CartNotFound(CartId),

    /// Requested quantity exceeds the stock currently on hand.
    #[error("Insufficient stock for product '{product_id}': requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u64,
        available: u32,
    },
}

/// Result type for store and engine operations.
pub type ShopResult<T> = Result<T, ShopError>;
