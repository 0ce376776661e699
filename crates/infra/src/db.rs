use std::collections::HashMap;
use std::sync::RwLock;

use fieldstock_core::{
    InventoryError, InventoryResult, KitTemplateId, ProductId, TransferOrderId, WarehouseId,
};
use fieldstock_inventory::{KitTemplate, TransferItem, TransferOrder, Warehouse};

/// All mutable inventory state behind a single lock.
///
/// One write-lock acquisition is the transaction: a write closure must
/// validate before it mutates, so returning `Err` leaves the state exactly
/// as it was. This is what makes `debit_all` all-or-nothing and lets two
/// concurrent transfer creations against the same source serialize instead
/// of both passing a stale sufficiency check.
///
/// Intended for a single-process deployment. A SQL-backed implementation
/// would map each closure to one database transaction with row locks.
#[derive(Debug, Default)]
pub struct InventoryDb {
    state: RwLock<DbState>,
}

#[derive(Debug, Default)]
pub(crate) struct DbState {
    pub(crate) warehouses: HashMap<WarehouseId, Warehouse>,
    pub(crate) stock: HashMap<(WarehouseId, ProductId), u64>,
    pub(crate) transfers: HashMap<TransferOrderId, TransferOrder>,
    pub(crate) kits: HashMap<KitTemplateId, KitTemplate>,
}

impl InventoryDb {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a read-only snapshot over the state.
    pub(crate) fn read<T>(
        &self,
        f: impl FnOnce(&DbState) -> InventoryResult<T>,
    ) -> InventoryResult<T> {
        let state = self
            .state
            .read()
            .map_err(|_| InventoryError::storage("inventory state lock poisoned"))?;
        f(&state)
    }

    /// Run a transaction over the state. Closures must not mutate before all
    /// checks have passed.
    pub(crate) fn write<T>(
        &self,
        f: impl FnOnce(&mut DbState) -> InventoryResult<T>,
    ) -> InventoryResult<T> {
        let mut state = self
            .state
            .write()
            .map_err(|_| InventoryError::storage("inventory state lock poisoned"))?;
        f(&mut state)
    }
}

impl DbState {
    pub(crate) fn warehouse(&self, id: WarehouseId) -> InventoryResult<&Warehouse> {
        self.warehouses
            .get(&id)
            .ok_or(InventoryError::WarehouseNotFound(id))
    }

    /// Warehouse that exists and has not been soft-disabled.
    pub(crate) fn active_warehouse(&self, id: WarehouseId) -> InventoryResult<&Warehouse> {
        let warehouse = self.warehouse(id)?;
        if !warehouse.is_active() {
            return Err(InventoryError::validation(format!(
                "warehouse {id} is disabled"
            )));
        }
        Ok(warehouse)
    }

    /// Current quantity; pairs never touched are implicitly zero.
    pub(crate) fn level(&self, warehouse_id: WarehouseId, product_id: ProductId) -> u64 {
        self.stock
            .get(&(warehouse_id, product_id))
            .copied()
            .unwrap_or(0)
    }

    pub(crate) fn credit(&mut self, warehouse_id: WarehouseId, product_id: ProductId, quantity: u64) {
        *self.stock.entry((warehouse_id, product_id)).or_insert(0) += quantity;
    }

    /// All-or-nothing multi-item debit: demand is checked against current
    /// levels before any row is decremented. Lines may repeat a product
    /// (kit-prefilled drafts do), so quantities are summed per product first.
    pub(crate) fn debit_all(
        &mut self,
        warehouse_id: WarehouseId,
        items: &[TransferItem],
    ) -> InventoryResult<()> {
        let mut demand: HashMap<ProductId, u64> = HashMap::new();
        for item in items {
            *demand.entry(item.product_id).or_insert(0) += item.quantity;
        }

        for (&product_id, &requested) in &demand {
            let available = self.level(warehouse_id, product_id);
            if available < requested {
                return Err(InventoryError::InsufficientStock {
                    warehouse_id,
                    product_id,
                    available,
                    requested,
                });
            }
        }

        for (product_id, requested) in demand {
            let entry = self.stock.entry((warehouse_id, product_id)).or_insert(0);
            *entry -= requested;
        }

        Ok(())
    }

    /// Whether any (warehouse, product) row for this warehouse is nonzero.
    pub(crate) fn holds_stock(&self, warehouse_id: WarehouseId) -> bool {
        self.stock
            .iter()
            .any(|((w, _), qty)| *w == warehouse_id && *qty > 0)
    }

    /// Whether any Pending transfer references this warehouse as source or
    /// destination.
    pub(crate) fn has_pending_transfers(&self, warehouse_id: WarehouseId) -> bool {
        self.transfers.values().any(|t| {
            t.is_pending()
                && (t.from_warehouse_id() == warehouse_id || t.to_warehouse_id() == warehouse_id)
        })
    }
}
