//! Capacity validation for cuboid assignments.

use store::{Bag, CuboidId, Dimensions};

use crate::error::Rejection;
use crate::volume::{available_volume, available_volume_excluding, payload_volume};

/// Decides whether a cuboid of the given dimensions may be assigned to `bag`.
///
/// `replacing` names the cuboid being resized or moved, whose current
/// volume is left out of the bag's load before comparing. A cuboid that
/// exactly fills the remaining volume is accepted.
pub fn validate_assignment(
    candidate: &Dimensions,
    bag: &Bag,
    replacing: Option<CuboidId>,
) -> Result<(), Rejection> {
    if bag.disabled {
        return Err(Rejection::BagDisabled);
    }

    let available = match replacing {
        Some(id) => available_volume_excluding(bag, id),
        None => available_volume(bag),
    };
    if payload_volume(candidate) > available {
        return Err(Rejection::InsufficientCapacity);
    }

    Ok(())
}
