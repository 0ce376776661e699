//! `fieldstock-infra` — storage and service layer for the inventory core.
//!
//! The domain crate stays pure; everything stateful lives here:
//! - [`db::InventoryDb`]: the shared transactional store.
//! - [`registry::WarehouseRegistry`]: CRUD for stock locations.
//! - [`ledger::StockLedger`]: per-(warehouse, product) quantity store.
//! - [`kits::KitCatalog`]: reusable kit templates.
//! - [`transfers::TransferEngine`]: the Pending/Confirmed/Cancelled state machine.

pub mod db;
pub mod kits;
pub mod ledger;
pub mod registry;
pub mod transfers;

#[cfg(test)]
mod integration_tests;

pub use db::InventoryDb;
pub use kits::KitCatalog;
pub use ledger::StockLedger;
pub use registry::WarehouseRegistry;
pub use transfers::TransferEngine;
