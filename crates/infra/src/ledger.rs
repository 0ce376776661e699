use std::sync::Arc;

use fieldstock_core::{InventoryResult, ProductId, WarehouseId};
use fieldstock_inventory::{StockLevel, TransferItem};

use crate::db::InventoryDb;

/// The authoritative per-(warehouse, product) quantity store.
///
/// Quantities are unsigned and every debit is checked before it is applied,
/// so a level can never go negative. Credits have no upper bound; only
/// external replenishment (a purchase receipt) grows the system-wide total.
#[derive(Debug, Clone)]
pub struct StockLedger {
    db: Arc<InventoryDb>,
}

impl StockLedger {
    pub fn new(db: Arc<InventoryDb>) -> Self {
        Self { db }
    }

    /// Snapshot of the warehouse's nonzero stock rows, ordered by product id.
    pub fn levels(&self, warehouse_id: WarehouseId) -> InventoryResult<Vec<StockLevel>> {
        self.db.read(|state| {
            state.warehouse(warehouse_id)?;

            let mut levels: Vec<StockLevel> = state
                .stock
                .iter()
                .filter(|((w, _), qty)| *w == warehouse_id && **qty > 0)
                .map(|((_, product_id), qty)| StockLevel {
                    warehouse_id,
                    product_id: *product_id,
                    quantity: *qty,
                })
                .collect();
            levels.sort_by_key(|l| l.product_id);
            Ok(levels)
        })
    }

    /// Current quantity for one (warehouse, product) pair; implicit zero for
    /// pairs never touched.
    pub fn level(&self, warehouse_id: WarehouseId, product_id: ProductId) -> InventoryResult<u64> {
        self.db.read(|state| {
            state.warehouse(warehouse_id)?;
            Ok(state.level(warehouse_id, product_id))
        })
    }

    /// Atomic check-then-decrement of a single row. Fails with
    /// `InsufficientStock` when the warehouse holds less than requested.
    pub fn debit(
        &self,
        warehouse_id: WarehouseId,
        product_id: ProductId,
        quantity: u64,
    ) -> InventoryResult<()> {
        self.debit_all(
            warehouse_id,
            &[TransferItem {
                product_id,
                quantity,
            }],
        )
    }

    /// Atomic increment. Always succeeds for an existing warehouse.
    pub fn credit(
        &self,
        warehouse_id: WarehouseId,
        product_id: ProductId,
        quantity: u64,
    ) -> InventoryResult<()> {
        self.db.write(|state| {
            state.warehouse(warehouse_id)?;
            state.credit(warehouse_id, product_id, quantity);
            Ok(())
        })?;

        tracing::debug!(%warehouse_id, %product_id, quantity, "stock credited");
        Ok(())
    }

    /// All-or-nothing multi-item debit: if any single item fails the
    /// sufficiency check, no row in the batch is decremented.
    pub fn debit_all(
        &self,
        warehouse_id: WarehouseId,
        items: &[TransferItem],
    ) -> InventoryResult<()> {
        self.db.write(|state| {
            state.warehouse(warehouse_id)?;
            state.debit_all(warehouse_id, items)
        })?;

        tracing::debug!(%warehouse_id, lines = items.len(), "stock debited");
        Ok(())
    }
}
