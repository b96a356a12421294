//! Volume arithmetic for bags and cuboids.
//!
//! Volumes are computed as `i128`. The product of two `i64` dimensions is
//! exact there; the third factor and any sums saturate at `i128::MAX`, which
//! is far above any `i64` capacity, so an oversized cuboid always compares
//! as larger than the room left in a bag.

use store::{Bag, CuboidId, Dimensions};

/// Returns the volume a cuboid occupies: `length * width * height`.
pub fn payload_volume(dimensions: &Dimensions) -> i128 {
    (i128::from(dimensions.length) * i128::from(dimensions.width))
        .saturating_mul(i128::from(dimensions.height))
}

/// Returns the summed payload volume of every cuboid assigned to `bag`.
///
/// The bag's cuboid collection must be loaded.
pub fn consumed_volume(bag: &Bag) -> i128 {
    bag.cuboids
        .iter()
        .map(|c| payload_volume(&c.dimensions))
        .fold(0, i128::saturating_add)
}

/// Returns the volume still free in `bag`.
pub fn available_volume(bag: &Bag) -> i128 {
    i128::from(bag.capacity).saturating_sub(consumed_volume(bag))
}

/// Returns the volume free in `bag` if the cuboid `excluded` were taken out.
///
/// Used when re-validating a cuboid that may already sit in the bag.
pub fn available_volume_excluding(bag: &Bag, excluded: CuboidId) -> i128 {
    let consumed = bag
        .cuboids
        .iter()
        .filter(|c| c.id != excluded)
        .map(|c| payload_volume(&c.dimensions))
        .fold(0, i128::saturating_add);
    i128::from(bag.capacity).saturating_sub(consumed)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::Utc;
    use store::{Bag, BagId, Cuboid, CuboidId, Dimensions};

    pub fn bag(capacity: i64, cuboids: &[(i64, Dimensions)]) -> Bag {
        let now = Utc::now();
        Bag {
            id: BagId::new(1),
            title: "test bag".to_string(),
            capacity,
            disabled: false,
            created_at: now,
            updated_at: now,
            cuboids: cuboids
                .iter()
                .map(|(id, dimensions)| Cuboid {
                    id: CuboidId::new(*id),
                    bag_id: BagId::new(1),
                    dimensions: *dimensions,
                    created_at: now,
                    updated_at: now,
                    bag: None,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::bag;
    use super::*;

    #[test]
    fn payload_volume_is_product_of_dimensions() {
        assert_eq!(payload_volume(&Dimensions::new(5, 5, 4)), 100);
        assert_eq!(payload_volume(&Dimensions::new(1, 1, 1)), 1);
    }

    #[test]
    fn payload_volume_does_not_wrap_past_i64() {
        let huge = Dimensions::new(i64::MAX, 2, 2);
        assert_eq!(payload_volume(&huge), i128::from(i64::MAX) * 4);

        let absurd = Dimensions::new(i64::MAX, i64::MAX, i64::MAX);
        assert_eq!(payload_volume(&absurd), i128::MAX);
    }

    #[test]
    fn consumed_volume_can_exceed_capacity_range() {
        let bag = bag(
            i64::MAX,
            &[
                (1, Dimensions::new(i64::MAX, 1, 1)),
                (2, Dimensions::new(i64::MAX, 1, 1)),
            ],
        );
        assert_eq!(consumed_volume(&bag), i128::from(i64::MAX) * 2);
        assert_eq!(available_volume(&bag), -i128::from(i64::MAX));
    }

    #[test]
    fn empty_bag_has_full_capacity_available() {
        let bag = bag(100, &[]);
        assert_eq!(consumed_volume(&bag), 0);
        assert_eq!(available_volume(&bag), 100);
    }

    #[test]
    fn available_volume_subtracts_assigned_cuboids() {
        let bag = bag(
            100,
            &[(1, Dimensions::new(2, 2, 2)), (2, Dimensions::new(3, 3, 3))],
        );
        assert_eq!(consumed_volume(&bag), 35);
        assert_eq!(available_volume(&bag), 65);
    }

    #[test]
    fn excluding_a_cuboid_frees_its_volume() {
        let bag = bag(
            100,
            &[(1, Dimensions::new(2, 2, 2)), (2, Dimensions::new(3, 3, 3))],
        );
        assert_eq!(available_volume_excluding(&bag, CuboidId::new(2)), 92);
        assert_eq!(available_volume_excluding(&bag, CuboidId::new(7)), 65);
    }
}
