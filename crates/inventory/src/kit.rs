use serde::{Deserialize, Serialize};

use fieldstock_core::{InventoryError, KitTemplateId};

use crate::stock::{validate_items, TransferItem};

/// A named, reusable loadout: a list of (product, quantity) pairs used to
/// prefill a transfer's item list.
///
/// Templates are edited independently of transfers and are read-only when
/// applied: [`KitTemplate::materialize`] copies the items, so a draft built
/// from a kit never aliases the stored template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitTemplate {
    id: KitTemplateId,
    name: String,
    description: String,
    items: Vec<TransferItem>,
}

impl KitTemplate {
    pub fn new(
        id: KitTemplateId,
        name: impl Into<String>,
        description: impl Into<String>,
        items: Vec<TransferItem>,
    ) -> Result<Self, InventoryError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(InventoryError::validation("kit name cannot be empty"));
        }
        validate_items(&items)?;

        Ok(Self {
            id,
            name,
            description: description.into(),
            items,
        })
    }

    pub fn id(&self) -> KitTemplateId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn items(&self) -> &[TransferItem] {
        &self.items
    }

    /// Fresh copy of the kit's items for use as a transfer draft.
    pub fn materialize(&self) -> Vec<TransferItem> {
        self.items.clone()
    }

    /// Append the kit's items to an existing draft. Purely a draft concern:
    /// the ledger is untouched until the draft is submitted as a transfer.
    pub fn apply_to(&self, mut draft: Vec<TransferItem>) -> Vec<TransferItem> {
        draft.extend(self.materialize());
        draft
    }
}
