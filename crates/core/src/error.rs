//! Domain error model.

use thiserror::Error;

use crate::id::{KitTemplateId, ProductId, TransferOrderId, WarehouseId};

/// Result type used across the inventory domain.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Inventory domain error.
///
/// Every variant except `Storage` is an expected, recoverable condition
/// returned to the caller as a value. `Storage` signals a transaction that
/// could not run to completion (infrastructure failure); the operation has
/// been rolled back and can be retried safely.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// Malformed input: empty item list, non-positive quantity, source equal
    /// to destination, missing custodian for a mobile warehouse.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier string could not be parsed.
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// Referenced warehouse does not exist.
    #[error("warehouse not found: {0}")]
    WarehouseNotFound(WarehouseId),

    /// Referenced product does not exist in the external catalog.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),

    /// Referenced kit template does not exist.
    #[error("kit template not found: {0}")]
    KitNotFound(KitTemplateId),

    /// A debit was requested for more stock than the source holds. Surfaced
    /// verbatim so callers can show the shortfall.
    #[error("insufficient stock for product {product_id} at warehouse {warehouse_id}: available {available}, requested {requested}")]
    InsufficientStock {
        warehouse_id: WarehouseId,
        product_id: ProductId,
        available: u64,
        requested: u64,
    },

    /// Confirm/cancel attempted on a transfer that is not Pending (already
    /// confirmed, already cancelled, or unknown id).
    #[error("transfer is not pending: {0}")]
    TransferNotPending(TransferOrderId),

    /// Attempt to disable a warehouse that still holds stock or is referenced
    /// by a pending transfer.
    #[error("warehouse still holds stock or pending transfers: {0}")]
    HasActiveStock(WarehouseId),

    /// Infrastructure failure; the transaction was rolled back.
    #[error("storage failure: {0}")]
    Storage(String),
}

impl InventoryError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Whether the error is a domain condition (as opposed to an
    /// infrastructure failure a caller may blindly retry).
    pub fn is_domain(&self) -> bool {
        !matches!(self, Self::Storage(_))
    }
}
