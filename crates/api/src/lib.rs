//! HTTP API server for the bag and cuboid inventory.
//!
//! Provides REST endpoints for cuboids and the bags they are packed into,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use domain::InventoryService;
use metrics_exporter_prometheus::PrometheusHandle;
use store::InventoryStore;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::{AppState, SharedState};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: InventoryStore + 'static>(
    state: SharedState<S>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::render))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route(
            "/cuboids",
            get(routes::cuboids::list::<S>).post(routes::cuboids::create::<S>),
        )
        .route(
            "/cuboids/{cuboid_id}",
            get(routes::cuboids::get::<S>)
                .put(routes::cuboids::update::<S>)
                .patch(routes::cuboids::update::<S>)
                .delete(routes::cuboids::delete::<S>),
        )
        .route(
            "/bags",
            get(routes::bags::list::<S>).post(routes::bags::create::<S>),
        )
        .route(
            "/bags/{bag_id}",
            get(routes::bags::get::<S>).delete(routes::bags::delete::<S>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Wraps a store in the application state shared by all handlers.
pub fn create_state<S: InventoryStore>(store: S) -> SharedState<S> {
    Arc::new(AppState {
        inventory: InventoryService::new(store),
    })
}
