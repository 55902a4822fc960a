//! Inventory and order-planning backend for small manufacturing shops.
//!
//! Tracks raw materials, the products assembled from them, and the
//! bill-of-materials relationship between the two, and exposes the two
//! business routines built on top of that data: the stock replenishment
//! sweep and the order feasibility/consumption procedure.

pub mod config;
pub mod db;
pub mod entities;
pub mod errors;
pub mod events;
pub mod handlers;
pub mod migrator;
pub mod services;

use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Shared application state handed to every HTTP handler.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<db::DbPool>,
    pub config: config::AppConfig,
    pub event_sender: events::EventSender,
    pub materials: services::materials::MaterialService,
    pub products: services::products::ProductService,
    pub bom: services::bom::BomService,
    pub orders: services::orders::OrderService,
}

impl AppState {
    pub fn new(
        db: Arc<db::DbPool>,
        config: config::AppConfig,
        event_sender: events::EventSender,
    ) -> Self {
        Self {
            materials: services::materials::MaterialService::new(
                db.clone(),
                event_sender.clone(),
            ),
            products: services::products::ProductService::new(db.clone(), event_sender.clone()),
            bom: services::bom::BomService::new(db.clone(), event_sender.clone()),
            orders: services::orders::OrderService::new(db.clone(), event_sender.clone()),
            db,
            config,
            event_sender,
        }
    }
}

/// All v1 API routes.
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .nest("/materials", handlers::materials::material_routes())
        .nest("/products", handlers::products::product_routes())
        .nest("/orders", handlers::orders::order_routes())
}

/// Builds the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "shopfloor-api up" }))
        .route("/health", get(|| async { "ok" }))
        .nest("/api/v1", api_v1_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
