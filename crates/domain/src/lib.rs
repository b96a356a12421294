//! Domain layer for the bag and cuboid inventory.
//!
//! This crate provides:
//! - Volume arithmetic over bags and cuboids
//! - The capacity validator guarding every write that can grow a bag's load
//! - Entity lookup that separates absent records from storage failures
//! - `InventoryService`, which orchestrates lookup, validation and persistence

pub mod capacity;
pub mod error;
pub mod lookup;
pub mod patch;
pub mod service;
pub mod volume;

pub use capacity::validate_assignment;
pub use error::{DomainError, Rejection};
pub use patch::CuboidPatch;
pub use service::InventoryService;
pub use volume::{available_volume, available_volume_excluding, consumed_volume, payload_volume};
