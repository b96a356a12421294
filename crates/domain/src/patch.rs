//! Partial updates for cuboids.

use serde::{Deserialize, Serialize};
use store::{BagId, Cuboid};

/// Fields of a cuboid a client may change. Absent fields are left as stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CuboidPatch {
    pub bag_id: Option<BagId>,
    pub length: Option<i64>,
    pub width: Option<i64>,
    pub height: Option<i64>,
}

impl CuboidPatch {
    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merges the present fields onto `cuboid`.
    pub fn apply(&self, cuboid: &mut Cuboid) {
        if let Some(bag_id) = self.bag_id {
            cuboid.bag_id = bag_id;
        }
        if let Some(length) = self.length {
            cuboid.dimensions.length = length;
        }
        if let Some(width) = self.width {
            cuboid.dimensions.width = width;
        }
        if let Some(height) = self.height {
            cuboid.dimensions.height = height;
        }
    }
}
