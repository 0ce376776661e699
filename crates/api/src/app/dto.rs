use serde::Deserialize;

use fieldstock_inventory::{KitTemplate, StockLevel, TransferItem, TransferOrder, Warehouse};

use crate::app::errors;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct CreateWarehouseRequest {
    pub name: String,
    pub kind: String,
    pub custodian_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransferItemRequest {
    pub product_id: String,
    pub quantity: u64,
}

#[derive(Debug, Deserialize)]
pub struct CreateTransferRequest {
    pub from: String,
    pub to: String,
    pub items: Vec<TransferItemRequest>,
}

#[derive(Debug, Deserialize)]
pub struct ReceiptRequest {
    pub warehouse_id: String,
    pub product_id: String,
    pub quantity: u64,
}

#[derive(Debug, Deserialize)]
pub struct CreateKitRequest {
    pub name: String,
    pub description: Option<String>,
    pub items: Vec<TransferItemRequest>,
}

/// Parse request items into domain items (quantity checks happen in the
/// domain; only id parsing can fail here).
pub fn to_transfer_items(
    req_items: Vec<TransferItemRequest>,
) -> Result<Vec<TransferItem>, axum::response::Response> {
    let mut items = Vec::with_capacity(req_items.len());
    for item in req_items {
        let product_id = match item.product_id.parse() {
            Ok(id) => id,
            Err(e) => return Err(errors::error_to_response(e)),
        };
        items.push(TransferItem {
            product_id,
            quantity: item.quantity,
        });
    }
    Ok(items)
}

// -------------------------
// JSON mapping helpers
// -------------------------

pub fn warehouse_to_json(w: &Warehouse) -> serde_json::Value {
    serde_json::json!({
        "id": w.id().to_string(),
        "name": w.name(),
        "kind": match w.kind() {
            fieldstock_inventory::WarehouseKind::Central => "central",
            fieldstock_inventory::WarehouseKind::Mobile => "mobile",
        },
        "custodian_id": w.custodian_id().map(|c| c.to_string()),
        "active": w.is_active(),
        "created_at": w.created_at().to_rfc3339(),
    })
}

pub fn level_to_json(l: &StockLevel) -> serde_json::Value {
    serde_json::json!({
        "product_id": l.product_id.to_string(),
        "quantity": l.quantity,
    })
}

pub fn transfer_to_json(t: &TransferOrder) -> serde_json::Value {
    serde_json::json!({
        "id": t.id().to_string(),
        "from": t.from_warehouse_id().to_string(),
        "to": t.to_warehouse_id().to_string(),
        "status": t.status(),
        "items": t.items().iter().map(|i| serde_json::json!({
            "product_id": i.product_id.to_string(),
            "quantity": i.quantity,
        })).collect::<Vec<_>>(),
        "created_at": t.created_at().to_rfc3339(),
        "confirmed_at": t.confirmed_at().map(|d| d.to_rfc3339()),
    })
}

pub fn kit_to_json(k: &KitTemplate) -> serde_json::Value {
    serde_json::json!({
        "id": k.id().to_string(),
        "name": k.name(),
        "description": k.description(),
        "items": k.items().iter().map(|i| serde_json::json!({
            "product_id": i.product_id.to_string(),
            "quantity": i.quantity,
        })).collect::<Vec<_>>(),
    })
}
