use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use fieldstock_core::{InventoryError, UserId, WarehouseId};

/// Physical or virtual stock location kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarehouseKind {
    /// Fixed depot; may exist without a custodian.
    Central,
    /// Technician vehicle; always accountable to a custodian.
    Mobile,
}

/// A stock location. Never physically deleted once it has ledger history;
/// `active` is the soft-disable flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    id: WarehouseId,
    name: String,
    kind: WarehouseKind,
    custodian_id: Option<UserId>,
    active: bool,
    created_at: DateTime<Utc>,
}

impl Warehouse {
    pub fn new(
        id: WarehouseId,
        name: impl Into<String>,
        kind: WarehouseKind,
        custodian_id: Option<UserId>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, InventoryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InventoryError::validation("warehouse name cannot be empty"));
        }
        if kind == WarehouseKind::Mobile && custodian_id.is_none() {
            return Err(InventoryError::validation(
                "mobile warehouse requires a custodian",
            ));
        }

        Ok(Self {
            id,
            name,
            kind,
            custodian_id,
            active: true,
            created_at,
        })
    }

    pub fn id(&self) -> WarehouseId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> WarehouseKind {
        self.kind
    }

    pub fn custodian_id(&self) -> Option<UserId> {
        self.custodian_id
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Soft-disable. The caller is responsible for checking that the
    /// warehouse holds no stock and no pending transfers first.
    pub fn disable(&mut self) {
        self.active = false;
    }
}
