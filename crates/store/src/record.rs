//! Records owned by the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BagId, CuboidId};

/// Edge lengths of a cuboid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: i64,
    pub width: i64,
    pub height: i64,
}

impl Dimensions {
    pub fn new(length: i64, width: i64, height: i64) -> Self {
        Self {
            length,
            width,
            height,
        }
    }
}

/// A container with a fixed volume budget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bag {
    pub id: BagId,
    pub title: String,
    pub capacity: i64,
    pub disabled: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// Cuboids currently assigned to this bag.
    ///
    /// Every store loads this collection whenever it returns a bag.
    #[serde(default)]
    pub cuboids: Vec<Cuboid>,
}

/// A rectangular item stored in exactly one bag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cuboid {
    pub id: CuboidId,
    pub bag_id: BagId,
    #[serde(flatten)]
    pub dimensions: Dimensions,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    /// The owning bag, present when the cuboid was fetched by id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bag: Option<Box<Bag>>,
}

/// Fields required to insert a bag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBag {
    pub title: String,
    pub capacity: i64,
    #[serde(default)]
    pub disabled: bool,
}

impl NewBag {
    pub fn new(title: impl Into<String>, capacity: i64) -> Self {
        Self {
            title: title.into(),
            capacity,
            disabled: false,
        }
    }

    /// Marks the bag as disabled on creation.
    pub fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }
}

/// Fields required to insert a cuboid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCuboid {
    pub bag_id: BagId,
    #[serde(flatten)]
    pub dimensions: Dimensions,
}

impl NewCuboid {
    pub fn new(bag_id: BagId, dimensions: Dimensions) -> Self {
        Self { bag_id, dimensions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cuboid() -> Cuboid {
        let now = Utc::now();
        Cuboid {
            id: CuboidId::new(3),
            bag_id: BagId::new(1),
            dimensions: Dimensions::new(2, 3, 4),
            created_at: now,
            updated_at: now,
            bag: None,
        }
    }

    #[test]
    fn cuboid_serializes_dimensions_inline() {
        let json = serde_json::to_value(sample_cuboid()).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["bag_id"], 1);
        assert_eq!(json["length"], 2);
        assert_eq!(json["width"], 3);
        assert_eq!(json["height"], 4);
        assert!(json.get("dimensions").is_none());
        assert!(json.get("bag").is_none());
    }

    #[test]
    fn cuboid_serializes_loaded_bag() {
        let now = Utc::now();
        let mut cuboid = sample_cuboid();
        cuboid.bag = Some(Box::new(Bag {
            id: BagId::new(1),
            title: "carry-on".to_string(),
            capacity: 100,
            disabled: false,
            created_at: now,
            updated_at: now,
            cuboids: Vec::new(),
        }));

        let json = serde_json::to_value(cuboid).unwrap();
        assert_eq!(json["bag"]["id"], 1);
        assert_eq!(json["bag"]["capacity"], 100);
    }

    #[test]
    fn new_bag_is_enabled_by_default() {
        let bag: NewBag = serde_json::from_str(r#"{"title":"tote","capacity":10}"#).unwrap();
        assert!(!bag.disabled);
        assert!(NewBag::new("tote", 10).disabled().disabled);
    }
}
