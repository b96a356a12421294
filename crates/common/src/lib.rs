//! Shared types used across the inventory crates.

pub mod types;

pub use types::{BagId, CuboidId};
