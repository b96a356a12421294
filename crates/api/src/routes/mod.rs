pub mod bags;
pub mod cuboids;
pub mod health;
pub mod metrics;

use std::sync::Arc;

use domain::InventoryService;
use serde::Serialize;
use store::InventoryStore;

/// Shared application state accessible from all handlers.
pub struct AppState<S: InventoryStore> {
    pub inventory: InventoryService<S>,
}

/// Shared handle to the application state, as stored in the router.
pub type SharedState<S> = Arc<AppState<S>>;

/// Plain `{"status": ...}` acknowledgement body.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
}

impl StatusResponse {
    /// Acknowledges a completed deletion.
    pub fn done() -> Self {
        Self { status: "Done" }
    }
}
