use std::sync::Arc;

use chrono::Utc;

use fieldstock_core::{InventoryError, InventoryResult, UserId, WarehouseId};
use fieldstock_inventory::{Warehouse, WarehouseKind};

use crate::db::InventoryDb;

/// CRUD for stock locations (central depot, mobile technician units).
///
/// Locations with ledger history are never deleted, only soft-disabled, and
/// a disable is refused while the location still holds stock or is part of
/// an in-flight transfer.
#[derive(Debug, Clone)]
pub struct WarehouseRegistry {
    db: Arc<InventoryDb>,
}

impl WarehouseRegistry {
    pub fn new(db: Arc<InventoryDb>) -> Self {
        Self { db }
    }

    pub fn create(
        &self,
        name: impl Into<String>,
        kind: WarehouseKind,
        custodian_id: Option<UserId>,
    ) -> InventoryResult<Warehouse> {
        let warehouse = Warehouse::new(WarehouseId::new(), name, kind, custodian_id, Utc::now())?;

        let created = self.db.write(|state| {
            state.warehouses.insert(warehouse.id(), warehouse.clone());
            Ok(warehouse)
        })?;

        tracing::info!(warehouse_id = %created.id(), kind = ?created.kind(), "warehouse created");
        Ok(created)
    }

    /// All warehouses (including disabled ones), in creation order.
    pub fn list(&self) -> InventoryResult<Vec<Warehouse>> {
        self.db.read(|state| {
            let mut warehouses: Vec<Warehouse> = state.warehouses.values().cloned().collect();
            warehouses.sort_by_key(|w| (w.created_at(), w.id()));
            Ok(warehouses)
        })
    }

    pub fn get(&self, id: WarehouseId) -> InventoryResult<Warehouse> {
        self.db.read(|state| state.warehouse(id).cloned())
    }

    /// Soft-disable a warehouse. Fails with `HasActiveStock` while the
    /// warehouse holds nonzero stock or any Pending transfer references it.
    pub fn disable(&self, id: WarehouseId) -> InventoryResult<()> {
        self.db.write(|state| {
            state.warehouse(id)?;

            if state.holds_stock(id) || state.has_pending_transfers(id) {
                return Err(InventoryError::HasActiveStock(id));
            }

            if let Some(warehouse) = state.warehouses.get_mut(&id) {
                warehouse.disable();
            }
            Ok(())
        })?;

        tracing::info!(warehouse_id = %id, "warehouse disabled");
        Ok(())
    }
}
