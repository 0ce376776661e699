use axum::Router;

pub mod inventory;
pub mod kits;
pub mod system;
pub mod warehouses;

/// Router for all inventory-core endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/warehouses", warehouses::router())
        .nest("/inventory", inventory::router())
}
