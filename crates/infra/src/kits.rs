use std::sync::Arc;

use fieldstock_core::{InventoryError, InventoryResult, KitTemplateId};
use fieldstock_inventory::{KitTemplate, TransferItem};

use crate::db::InventoryDb;

/// Catalog of reusable kit templates.
#[derive(Debug, Clone)]
pub struct KitCatalog {
    db: Arc<InventoryDb>,
}

impl KitCatalog {
    pub fn new(db: Arc<InventoryDb>) -> Self {
        Self { db }
    }

    pub fn create(
        &self,
        name: impl Into<String>,
        description: impl Into<String>,
        items: Vec<TransferItem>,
    ) -> InventoryResult<KitTemplate> {
        let kit = KitTemplate::new(KitTemplateId::new(), name, description, items)?;

        let created = self.db.write(|state| {
            state.kits.insert(kit.id(), kit.clone());
            Ok(kit)
        })?;

        tracing::info!(kit_id = %created.id(), "kit template created");
        Ok(created)
    }

    /// All templates, in creation order (UUIDv7 ids are time-ordered).
    pub fn list(&self) -> InventoryResult<Vec<KitTemplate>> {
        self.db.read(|state| {
            let mut kits: Vec<KitTemplate> = state.kits.values().cloned().collect();
            kits.sort_by_key(|k| k.id());
            Ok(kits)
        })
    }

    pub fn get(&self, id: KitTemplateId) -> InventoryResult<KitTemplate> {
        self.db
            .read(|state| state.kits.get(&id).cloned().ok_or(InventoryError::KitNotFound(id)))
    }

    /// Fresh copy of the kit's items for use as a transfer draft. Mutating
    /// the returned list never affects the stored template.
    pub fn materialize(&self, id: KitTemplateId) -> InventoryResult<Vec<TransferItem>> {
        Ok(self.get(id)?.materialize())
    }

    /// Append a kit's items to a draft item list. Does not touch the ledger.
    pub fn apply_kit(
        &self,
        draft: Vec<TransferItem>,
        id: KitTemplateId,
    ) -> InventoryResult<Vec<TransferItem>> {
        Ok(self.get(id)?.apply_to(draft))
    }
}
