use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fieldstock_core::{InventoryError, TransferOrderId, WarehouseId};

use crate::stock::{validate_items, TransferItem};

/// Transfer order lifecycle.
///
/// Pending is the only non-terminal state; the two legal transitions are
/// Pending → Confirmed (receipt acknowledged by the destination custodian)
/// and Pending → Cancelled (stock returned to the source).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Pending,
    Confirmed,
    Cancelled,
}

/// A stock movement between two warehouses.
///
/// While Pending, the items have been debited from the source but not yet
/// credited to the destination: they are in transit. The item list is fixed
/// at creation; status changes only through [`TransferOrder::confirm`] and
/// [`TransferOrder::cancel`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferOrder {
    id: TransferOrderId,
    from_warehouse_id: WarehouseId,
    to_warehouse_id: WarehouseId,
    items: Vec<TransferItem>,
    status: TransferStatus,
    created_at: DateTime<Utc>,
    confirmed_at: Option<DateTime<Utc>>,
}

impl TransferOrder {
    pub fn new(
        id: TransferOrderId,
        from_warehouse_id: WarehouseId,
        to_warehouse_id: WarehouseId,
        items: Vec<TransferItem>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, InventoryError> {
        if from_warehouse_id == to_warehouse_id {
            return Err(InventoryError::validation(
                "source and destination warehouse must differ",
            ));
        }
        validate_items(&items)?;

        Ok(Self {
            id,
            from_warehouse_id,
            to_warehouse_id,
            items,
            status: TransferStatus::Pending,
            created_at,
            confirmed_at: None,
        })
    }

    pub fn id(&self) -> TransferOrderId {
        self.id
    }

    pub fn from_warehouse_id(&self) -> WarehouseId {
        self.from_warehouse_id
    }

    pub fn to_warehouse_id(&self) -> WarehouseId {
        self.to_warehouse_id
    }

    pub fn items(&self) -> &[TransferItem] {
        &self.items
    }

    pub fn status(&self) -> TransferStatus {
        self.status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn confirmed_at(&self) -> Option<DateTime<Utc>> {
        self.confirmed_at
    }

    pub fn is_pending(&self) -> bool {
        self.status == TransferStatus::Pending
    }

    /// Pending → Confirmed. The status check is the idempotency guard: a
    /// retry after a successful confirm fails here and never double-credits.
    pub fn confirm(&mut self, now: DateTime<Utc>) -> Result<(), InventoryError> {
        if !self.is_pending() {
            return Err(InventoryError::TransferNotPending(self.id));
        }
        self.status = TransferStatus::Confirmed;
        self.confirmed_at = Some(now);
        Ok(())
    }

    /// Pending → Cancelled. The caller credits the items back to the source
    /// in the same transaction.
    pub fn cancel(&mut self) -> Result<(), InventoryError> {
        if !self.is_pending() {
            return Err(InventoryError::TransferNotPending(self.id));
        }
        self.status = TransferStatus::Cancelled;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldstock_core::ProductId;

    fn item(quantity: u64) -> TransferItem {
        TransferItem {
            product_id: ProductId::new(),
            quantity,
        }
    }

    fn pending_order() -> TransferOrder {
        TransferOrder::new(
            TransferOrderId::new(),
            WarehouseId::new(),
            WarehouseId::new(),
            vec![item(4)],
            Utc::now(),
        )
        .unwrap()
    }

    #[test]
    fn new_order_starts_pending() {
        let order = pending_order();
        assert_eq!(order.status(), TransferStatus::Pending);
        assert!(order.confirmed_at().is_none());
    }

    #[test]
    fn same_source_and_destination_is_rejected() {
        let w = WarehouseId::new();
        let err = TransferOrder::new(TransferOrderId::new(), w, w, vec![item(1)], Utc::now())
            .unwrap_err();
        assert!(matches!(err, InventoryError::Validation(_)));
    }

    #[test]
    fn empty_items_are_rejected() {
        let err = TransferOrder::new(
            TransferOrderId::new(),
            WarehouseId::new(),
            WarehouseId::new(),
            vec![],
            Utc::now(),
        )
        .unwrap_err();
        assert!(matches!(err, InventoryError::Validation(_)));
    }

    #[test]
    fn confirm_sets_status_and_timestamp() {
        let mut order = pending_order();
        let now = Utc::now();
        order.confirm(now).unwrap();
        assert_eq!(order.status(), TransferStatus::Confirmed);
        assert_eq!(order.confirmed_at(), Some(now));
    }

    #[test]
    fn confirm_twice_fails_with_transfer_not_pending() {
        let mut order = pending_order();
        order.confirm(Utc::now()).unwrap();
        let err = order.confirm(Utc::now()).unwrap_err();
        assert_eq!(err, InventoryError::TransferNotPending(order.id()));
        // Status unchanged by the failed retry.
        assert_eq!(order.status(), TransferStatus::Confirmed);
    }

    #[test]
    fn cancel_moves_to_cancelled() {
        let mut order = pending_order();
        order.cancel().unwrap();
        assert_eq!(order.status(), TransferStatus::Cancelled);
        assert!(order.confirmed_at().is_none());
    }

    #[test]
    fn cancelled_order_cannot_be_confirmed() {
        let mut order = pending_order();
        order.cancel().unwrap();
        let err = order.confirm(Utc::now()).unwrap_err();
        assert!(matches!(err, InventoryError::TransferNotPending(_)));
    }
}
