use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use fieldstock_core::{UserId, WarehouseId};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_warehouses).post(create_warehouse))
        .route("/:id/disable", post(disable_warehouse))
}

pub async fn list_warehouses(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.registry.list() {
        Ok(warehouses) => (
            StatusCode::OK,
            Json(
                warehouses
                    .iter()
                    .map(dto::warehouse_to_json)
                    .collect::<Vec<_>>(),
            ),
        )
            .into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn create_warehouse(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateWarehouseRequest>,
) -> axum::response::Response {
    let kind = match errors::parse_warehouse_kind(&body.kind) {
        Ok(k) => k,
        Err(resp) => return resp,
    };

    let custodian_id: Option<UserId> = match body.custodian_id {
        Some(s) => match s.parse() {
            Ok(id) => Some(id),
            Err(e) => return errors::error_to_response(e),
        },
        None => None,
    };

    match services.registry.create(body.name, kind, custodian_id) {
        Ok(warehouse) => {
            (StatusCode::CREATED, Json(dto::warehouse_to_json(&warehouse))).into_response()
        }
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn disable_warehouse(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: WarehouseId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_to_response(e),
    };

    match services.registry.disable(id) {
        Ok(()) => (
            StatusCode::OK,
            Json(serde_json::json!({ "id": id.to_string(), "active": false })),
        )
            .into_response(),
        Err(e) => errors::error_to_response(e),
    }
}
