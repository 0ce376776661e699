//! Inventory custody domain module.
//!
//! This crate contains the business rules for warehouses, stock levels,
//! transfer orders and kit templates, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod kit;
pub mod stock;
pub mod transfer;
pub mod warehouse;

pub use kit::KitTemplate;
pub use stock::{validate_items, StockLevel, TransferItem};
pub use transfer::{TransferOrder, TransferStatus};
pub use warehouse::{Warehouse, WarehouseKind};
