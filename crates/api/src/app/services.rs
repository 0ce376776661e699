use std::sync::Arc;

use fieldstock_infra::{InventoryDb, KitCatalog, StockLedger, TransferEngine, WarehouseRegistry};

/// The inventory services exposed to route handlers.
///
/// All four share one [`InventoryDb`], so ledger mutations made through the
/// transfer engine are immediately visible to ledger reads.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub registry: WarehouseRegistry,
    pub ledger: StockLedger,
    pub kits: KitCatalog,
    pub transfers: TransferEngine,
}

pub fn build_services() -> AppServices {
    let db = Arc::new(InventoryDb::new());

    AppServices {
        registry: WarehouseRegistry::new(db.clone()),
        ledger: StockLedger::new(db.clone()),
        kits: KitCatalog::new(db.clone()),
        transfers: TransferEngine::new(db),
    }
}
