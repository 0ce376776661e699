use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use fieldstock_core::InventoryError;
use fieldstock_inventory::WarehouseKind;

pub fn error_to_response(err: InventoryError) -> axum::response::Response {
    match err {
        InventoryError::Validation(msg) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
        }
        InventoryError::InvalidId(msg) => json_error(StatusCode::BAD_REQUEST, "invalid_id", msg),
        InventoryError::WarehouseNotFound(id) => json_error(
            StatusCode::NOT_FOUND,
            "warehouse_not_found",
            format!("warehouse not found: {id}"),
        ),
        InventoryError::ProductNotFound(id) => json_error(
            StatusCode::NOT_FOUND,
            "product_not_found",
            format!("product not found: {id}"),
        ),
        InventoryError::KitNotFound(id) => json_error(
            StatusCode::NOT_FOUND,
            "kit_not_found",
            format!("kit template not found: {id}"),
        ),
        InventoryError::InsufficientStock {
            warehouse_id,
            product_id,
            available,
            requested,
        } => {
            // Shortfall details are part of the contract: the UI shows them.
            (
                StatusCode::CONFLICT,
                axum::Json(json!({
                    "error": "insufficient_stock",
                    "message": format!(
                        "insufficient stock for product {product_id}: available {available}, requested {requested}"
                    ),
                    "warehouse_id": warehouse_id.to_string(),
                    "product_id": product_id.to_string(),
                    "available": available,
                    "requested": requested,
                })),
            )
                .into_response()
        }
        InventoryError::TransferNotPending(id) => json_error(
            StatusCode::CONFLICT,
            "transfer_not_pending",
            format!("transfer is not pending: {id}"),
        ),
        InventoryError::HasActiveStock(id) => json_error(
            StatusCode::CONFLICT,
            "has_active_stock",
            format!("warehouse still holds stock or pending transfers: {id}"),
        ),
        InventoryError::Storage(msg) => {
            json_error(StatusCode::INTERNAL_SERVER_ERROR, "storage_error", msg)
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn parse_warehouse_kind(s: &str) -> Result<WarehouseKind, axum::response::Response> {
    match s.to_lowercase().as_str() {
        "central" => Ok(WarehouseKind::Central),
        "mobile" => Ok(WarehouseKind::Mobile),
        _ => Err(json_error(
            StatusCode::BAD_REQUEST,
            "invalid_warehouse_kind",
            "kind must be one of: central, mobile",
        )),
    }
}
