use async_trait::async_trait;

use crate::{
    Bag, BagId, Cuboid, CuboidId, Dimensions, NewBag, NewCuboid, Result, StoreError,
    ValidationErrors,
};

/// Core trait for inventory store implementations.
///
/// A store persists bags and cuboids and hands them back as fully
/// loaded records. All implementations must be thread-safe (Send + Sync).
#[async_trait]
pub trait InventoryStore: Send + Sync {
    /// Retrieves a bag with its cuboids loaded.
    ///
    /// Returns None if the bag doesn't exist.
    async fn get_bag(&self, id: BagId) -> Result<Option<Bag>>;

    /// Retrieves every bag, each with its cuboids loaded, ordered by id.
    async fn list_bags(&self) -> Result<Vec<Bag>>;

    /// Inserts a bag and returns the stored record.
    ///
    /// Fails with `Validation` if the bag violates a field constraint.
    async fn insert_bag(&self, bag: NewBag) -> Result<Bag>;

    /// Deletes a bag together with every cuboid assigned to it.
    async fn delete_bag(&self, id: BagId) -> Result<()>;

    /// Retrieves a cuboid with its bag (and the bag's cuboids) loaded.
    ///
    /// Returns None if the cuboid doesn't exist.
    async fn get_cuboid(&self, id: CuboidId) -> Result<Option<Cuboid>>;

    /// Retrieves every cuboid ordered by id. Bags are not loaded.
    async fn list_cuboids(&self) -> Result<Vec<Cuboid>>;

    /// Inserts a cuboid and returns the stored record.
    ///
    /// Fails with `Validation` if a dimension is not positive or the
    /// referenced bag doesn't exist.
    async fn insert_cuboid(&self, cuboid: NewCuboid) -> Result<Cuboid>;

    /// Writes the bag assignment and dimensions of an existing cuboid.
    ///
    /// Returns the stored record without its bag loaded.
    async fn update_cuboid(&self, cuboid: &Cuboid) -> Result<Cuboid>;

    /// Deletes a cuboid.
    async fn delete_cuboid(&self, id: CuboidId) -> Result<()>;
}

/// Extension trait turning absent records into errors.
#[async_trait]
pub trait InventoryStoreExt: InventoryStore {
    /// Retrieves a bag, failing with `BagNotFound` if it doesn't exist.
    async fn find_bag(&self, id: BagId) -> Result<Bag> {
        self.get_bag(id).await?.ok_or(StoreError::BagNotFound(id))
    }

    /// Retrieves a cuboid, failing with `CuboidNotFound` if it doesn't exist.
    async fn find_cuboid(&self, id: CuboidId) -> Result<Cuboid> {
        self.get_cuboid(id)
            .await?
            .ok_or(StoreError::CuboidNotFound(id))
    }
}

// Blanket implementation for all InventoryStore implementations
impl<T: InventoryStore + ?Sized> InventoryStoreExt for T {}

/// Validates a bag before inserting it.
pub fn validate_new_bag(bag: &NewBag) -> std::result::Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    if bag.title.trim().is_empty() {
        errors.push("title", "is required");
    }
    if bag.capacity <= 0 {
        errors.push("capacity", "must be greater than zero");
    }
    errors.into_result()
}

/// Validates cuboid dimensions before inserting or updating.
pub fn validate_dimensions(dimensions: &Dimensions) -> std::result::Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();
    for (field, value) in [
        ("length", dimensions.length),
        ("width", dimensions.width),
        ("height", dimensions.height),
    ] {
        if value <= 0 {
            errors.push(field, "must be greater than zero");
        }
    }
    errors.into_result()
}

/// Error reported when a cuboid references a bag that doesn't exist.
pub(crate) fn unknown_bag(bag_id: BagId) -> ValidationErrors {
    ValidationErrors::single("bag_id", format!("bag {bag_id} does not exist"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bag_requires_title_and_positive_capacity() {
        let err = validate_new_bag(&NewBag::new("  ", 0)).unwrap_err();
        let fields: Vec<_> = err.errors().iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["title", "capacity"]);

        assert!(validate_new_bag(&NewBag::new("duffel", 1)).is_ok());
    }

    #[test]
    fn dimensions_must_be_positive() {
        let err = validate_dimensions(&Dimensions::new(1, 0, -2)).unwrap_err();
        assert_eq!(
            err.to_string(),
            "width: must be greater than zero; height: must be greater than zero"
        );

        assert!(validate_dimensions(&Dimensions::new(1, 1, 1)).is_ok());
    }
}
