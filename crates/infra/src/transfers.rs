use std::sync::Arc;

use chrono::Utc;

use fieldstock_core::{InventoryError, InventoryResult, TransferOrderId, WarehouseId};
use fieldstock_inventory::{TransferItem, TransferOrder};

use crate::db::InventoryDb;

/// The transfer state machine over the stock ledger.
///
/// `create` moves quantity from "at source" to "in transit" (debit + Pending
/// order, one transaction). `confirm` moves it from "in transit" to "at
/// destination" (credit + Confirmed, one transaction). `cancel` returns it to
/// the source. Nothing is created or destroyed by the engine itself, so for
/// any product the sum of all levels plus all Pending transfer quantities is
/// invariant.
#[derive(Debug, Clone)]
pub struct TransferEngine {
    db: Arc<InventoryDb>,
}

impl TransferEngine {
    pub fn new(db: Arc<InventoryDb>) -> Self {
        Self { db }
    }

    /// Validate and atomically debit the source, persisting a Pending order.
    ///
    /// On `InsufficientStock` no order is persisted and no row is touched.
    /// Once this returns, any read of the source levels reflects the debit.
    pub fn create(
        &self,
        from_warehouse_id: WarehouseId,
        to_warehouse_id: WarehouseId,
        items: Vec<TransferItem>,
    ) -> InventoryResult<TransferOrder> {
        let order = TransferOrder::new(
            TransferOrderId::new(),
            from_warehouse_id,
            to_warehouse_id,
            items,
            Utc::now(),
        )?;

        let order = self.db.write(|state| {
            state.active_warehouse(from_warehouse_id)?;
            state.active_warehouse(to_warehouse_id)?;

            state.debit_all(from_warehouse_id, order.items())?;
            state.transfers.insert(order.id(), order.clone());
            Ok(order)
        })?;

        tracing::info!(
            transfer_id = %order.id(),
            from = %from_warehouse_id,
            to = %to_warehouse_id,
            lines = order.items().len(),
            "transfer created, stock in transit"
        );
        Ok(order)
    }

    /// Pending transfers awaiting confirmation at the given destination,
    /// in creation order.
    pub fn list_pending(&self, to_warehouse_id: WarehouseId) -> InventoryResult<Vec<TransferOrder>> {
        self.db.read(|state| {
            state.warehouse(to_warehouse_id)?;

            let mut pending: Vec<TransferOrder> = state
                .transfers
                .values()
                .filter(|t| t.is_pending() && t.to_warehouse_id() == to_warehouse_id)
                .cloned()
                .collect();
            pending.sort_by_key(|t| (t.created_at(), t.id()));
            Ok(pending)
        })
    }

    pub fn get(&self, id: TransferOrderId) -> InventoryResult<TransferOrder> {
        self.db.read(|state| {
            state
                .transfers
                .get(&id)
                .cloned()
                .ok_or(InventoryError::TransferNotPending(id))
        })
    }

    /// Destination custodian acknowledges receipt: credit every item to the
    /// destination and close the transfer, in one transaction.
    ///
    /// The status check and the credit happen under the same write lock, so a
    /// retry after a successful confirm fails with `TransferNotPending` and
    /// never double-credits.
    pub fn confirm(&self, id: TransferOrderId) -> InventoryResult<TransferOrder> {
        let order = self.db.write(|state| {
            let mut order = state
                .transfers
                .get(&id)
                .cloned()
                .ok_or(InventoryError::TransferNotPending(id))?;
            order.confirm(Utc::now())?;

            let to = order.to_warehouse_id();
            for item in order.items().to_vec() {
                state.credit(to, item.product_id, item.quantity);
            }
            state.transfers.insert(id, order.clone());
            Ok(order)
        })?;

        tracing::info!(transfer_id = %id, to = %order.to_warehouse_id(), "transfer confirmed");
        Ok(order)
    }

    /// Roll a Pending transfer back: credit every item to the source and mark
    /// the transfer Cancelled, in one transaction. Exactly undoes the debit
    /// performed by `create`.
    pub fn cancel(&self, id: TransferOrderId) -> InventoryResult<TransferOrder> {
        let order = self.db.write(|state| {
            let mut order = state
                .transfers
                .get(&id)
                .cloned()
                .ok_or(InventoryError::TransferNotPending(id))?;
            order.cancel()?;

            let from = order.from_warehouse_id();
            for item in order.items().to_vec() {
                state.credit(from, item.product_id, item.quantity);
            }
            state.transfers.insert(id, order.clone());
            Ok(order)
        })?;

        tracing::info!(transfer_id = %id, from = %order.from_warehouse_id(), "transfer cancelled");
        Ok(order)
    }
}
