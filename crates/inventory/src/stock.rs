use serde::{Deserialize, Serialize};

use fieldstock_core::{InventoryError, ProductId, WarehouseId};

/// One line of a transfer or kit: how much of one product moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferItem {
    pub product_id: ProductId,
    pub quantity: u64,
}

/// Snapshot row of the stock ledger for one (warehouse, product) pair.
///
/// Pairs never touched are implicitly zero and are not materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub warehouse_id: WarehouseId,
    pub product_id: ProductId,
    pub quantity: u64,
}

/// Validate an item list for use in a transfer or kit template: non-empty,
/// every quantity strictly positive. Caught at the boundary so invalid lists
/// never reach the ledger.
pub fn validate_items(items: &[TransferItem]) -> Result<(), InventoryError> {
    if items.is_empty() {
        return Err(InventoryError::validation("item list cannot be empty"));
    }
    for item in items {
        if item.quantity == 0 {
            return Err(InventoryError::validation(format!(
                "quantity must be positive for product {}",
                item.product_id
            )));
        }
    }
    Ok(())
}
