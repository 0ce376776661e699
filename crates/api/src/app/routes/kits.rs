use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use fieldstock_core::KitTemplateId;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_kits).post(create_kit))
        .route("/:id/items", get(materialize_kit))
}

pub async fn list_kits(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.kits.list() {
        Ok(kits) => (
            StatusCode::OK,
            Json(kits.iter().map(dto::kit_to_json).collect::<Vec<_>>()),
        )
            .into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

pub async fn create_kit(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateKitRequest>,
) -> axum::response::Response {
    let items = match dto::to_transfer_items(body.items) {
        Ok(items) => items,
        Err(resp) => return resp,
    };

    match services
        .kits
        .create(body.name, body.description.unwrap_or_default(), items)
    {
        Ok(kit) => (StatusCode::CREATED, Json(dto::kit_to_json(&kit))).into_response(),
        Err(e) => errors::error_to_response(e),
    }
}

/// Fresh copy of the kit's items, for prefilling a transfer draft client-side.
pub async fn materialize_kit(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: KitTemplateId = match id.parse() {
        Ok(id) => id,
        Err(e) => return errors::error_to_response(e),
    };

    match services.kits.materialize(id) {
        Ok(items) => (
            StatusCode::OK,
            Json(
                items
                    .iter()
                    .map(|i| {
                        serde_json::json!({
                            "product_id": i.product_id.to_string(),
                            "quantity": i.quantity,
                        })
                    })
                    .collect::<Vec<_>>(),
            ),
        )
            .into_response(),
        Err(e) => errors::error_to_response(e),
    }
}
