use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use fieldstock_core::{ProductId, TransferOrderId, WarehouseId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/levels/:warehouse_id", get(get_levels))
        .route("/receipts", post(post_receipt))
        .route("/transfer", post(create_transfer))
        .route("/transfers/pending/:warehouse_id", get(list_pending))
        .route("/transfers/:id", get(get_transfer))
        .route("/transfers/:id/confirm", post(confirm_transfer))
        .route("/transfers/:id/cancel", post(cancel_transfer))
        .nest("/kits", super::kits::router())
}

pub async fn get_levels(
    Extension(services): Extension<Arc<AppServices>>,
    Path(warehouse_id): Path<String>,
) -> axum::response::Response {
    let warehouse_id: WarehouseId = match warehouse_id.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_to_response(e),
    };

    match services.ledger.levels(warehouse_id) {
        Ok(levels) => (
            StatusCode::OK,
            Json(levels.iter().map(dto::level_to_json).collect::<Vec<_>>()),
        )
            .into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

/// External replenishment entry point (purchase receipt). The only way total
/// stock in the system grows.
pub async fn post_receipt(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ReceiptRequest>,
) -> axum::response::Response {
    let warehouse_id: WarehouseId = match body.warehouse_id.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_to_response(e),
    };
    let product_id: ProductId = match body.product_id.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_to_response(e),
    };
    if body.quantity == 0 {
        return errors::json_error(
            StatusCode::BAD_REQUEST,
            "validation_error",
            "quantity must be positive",
        );
    }

    match services.ledger.credit(warehouse_id, product_id, body.quantity) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "warehouse_id": warehouse_id.to_string(),
                "product_id": product_id.to_string(),
                "quantity": body.quantity,
            })),
        )
            .into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn create_transfer(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateTransferRequest>,
) -> axum::response::Response {
    let from: WarehouseId = match body.from.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_to_response(e),
    };
    let to: WarehouseId = match body.to.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_to_response(e),
    };
    let items = match dto::to_transfer_items(body.items) {
        Ok(items) => items,
        Err(resp) => return resp,
    };

    match services.transfers.create(from, to, items) {
        Ok(order) => (StatusCode::CREATED, Json(dto::transfer_to_json(&order))).into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn list_pending(
    Extension(services): Extension<Arc<AppServices>>,
    Path(warehouse_id): Path<String>,
) -> axum::response::Response {
    let warehouse_id: WarehouseId = match warehouse_id.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_to_response(e),
    };

    match services.transfers.list_pending(warehouse_id) {
        Ok(orders) => (
            StatusCode::OK,
            Json(orders.iter().map(dto::transfer_to_json).collect::<Vec<_>>()),
        )
            .into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn get_transfer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: TransferOrderId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_to_response(e),
    };

    match services.transfers.get(id) {
        Ok(order) => (StatusCode::OK, Json(dto::transfer_to_json(&order))).into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn confirm_transfer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: TransferOrderId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_to_response(e),
    };

    match services.transfers.confirm(id) {
        Ok(order) => (StatusCode::OK, Json(dto::transfer_to_json(&order))).into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn cancel_transfer(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: TransferOrderId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_to_response(e),
    };

    match services.transfers.cancel(id) {
        Ok(order) => (StatusCode::OK, Json(dto::transfer_to_json(&order))).into_response(),
        Err(e) => errors::error_to_response(e),
    }
}
