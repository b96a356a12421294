//! Inventory service orchestrating lookup, capacity checks and persistence.

use store::{
    Bag, BagId, Cuboid, CuboidId, Dimensions, InventoryStore, InventoryStoreExt, NewBag,
    NewCuboid,
};

use crate::capacity::validate_assignment;
use crate::error::DomainError;
use crate::lookup;
use crate::patch::CuboidPatch;

/// Service for managing bags and the cuboids packed into them.
///
/// Holds no state of its own: every call re-reads what it needs from the
/// store, so capacity decisions are made against freshly loaded bags.
pub struct InventoryService<S: InventoryStore> {
    store: S,
}

impl<S: InventoryStore> InventoryService<S> {
    /// Creates a new inventory service backed by the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Lists every cuboid.
    #[tracing::instrument(skip(self))]
    pub async fn list_cuboids(&self) -> Result<Vec<Cuboid>, DomainError> {
        self.store
            .list_cuboids()
            .await
            .map_err(DomainError::Storage)
    }

    /// Loads a cuboid together with its bag.
    #[tracing::instrument(skip(self))]
    pub async fn get_cuboid(&self, id: CuboidId) -> Result<Cuboid, DomainError> {
        lookup::find_cuboid(&self.store, id).await
    }

    /// Creates a cuboid if its bag is enabled and has room for it.
    #[tracing::instrument(skip(self))]
    pub async fn create_cuboid(&self, new: NewCuboid) -> Result<Cuboid, DomainError> {
        let bag = lookup::find_bag(&self.store, new.bag_id).await?;
        check_assignment(&new.dimensions, &bag, None)?;

        let cuboid = self
            .store
            .insert_cuboid(new)
            .await
            .map_err(DomainError::from_write)?;

        metrics::counter!("cuboids_created_total").increment(1);
        tracing::info!(cuboid_id = %cuboid.id, bag_id = %cuboid.bag_id, "cuboid created");
        Ok(cuboid)
    }

    /// Applies a partial update to a cuboid and re-validates it against its
    /// (possibly new) bag.
    ///
    /// The cuboid's own stored volume is excluded from the bag's load, so
    /// only its new volume is compared against what is left.
    #[tracing::instrument(skip(self))]
    pub async fn update_cuboid(
        &self,
        id: CuboidId,
        patch: CuboidPatch,
    ) -> Result<Cuboid, DomainError> {
        let mut cuboid = lookup::find_cuboid(&self.store, id).await?;
        let loaded_bag = cuboid.bag.take();
        patch.apply(&mut cuboid);

        let bag = match loaded_bag {
            Some(bag) if bag.id == cuboid.bag_id => *bag,
            _ => lookup::find_bag(&self.store, cuboid.bag_id).await?,
        };
        check_assignment(&cuboid.dimensions, &bag, Some(cuboid.id))?;

        self.store
            .update_cuboid(&cuboid)
            .await
            .map_err(DomainError::from_write)?;

        metrics::counter!("cuboids_updated_total").increment(1);
        tracing::info!(cuboid_id = %id, bag_id = %cuboid.bag_id, "cuboid updated");

        self.store
            .find_cuboid(id)
            .await
            .map_err(DomainError::from_write)
    }

    /// Deletes a cuboid. Removing volume can never break a bag's capacity,
    /// so no validation runs.
    #[tracing::instrument(skip(self))]
    pub async fn delete_cuboid(&self, id: CuboidId) -> Result<(), DomainError> {
        let cuboid = lookup::find_cuboid(&self.store, id).await?;

        self.store
            .delete_cuboid(cuboid.id)
            .await
            .map_err(DomainError::from_write)?;

        metrics::counter!("cuboids_deleted_total").increment(1);
        tracing::info!(cuboid_id = %id, "cuboid deleted");
        Ok(())
    }

    /// Lists every bag with its cuboids.
    #[tracing::instrument(skip(self))]
    pub async fn list_bags(&self) -> Result<Vec<Bag>, DomainError> {
        self.store.list_bags().await.map_err(DomainError::Storage)
    }

    /// Loads a bag with its cuboids.
    #[tracing::instrument(skip(self))]
    pub async fn get_bag(&self, id: BagId) -> Result<Bag, DomainError> {
        lookup::find_bag(&self.store, id).await
    }

    /// Creates an empty bag.
    #[tracing::instrument(skip(self))]
    pub async fn create_bag(&self, new: NewBag) -> Result<Bag, DomainError> {
        let bag = self
            .store
            .insert_bag(new)
            .await
            .map_err(DomainError::from_write)?;

        metrics::counter!("bags_created_total").increment(1);
        tracing::info!(bag_id = %bag.id, capacity = bag.capacity, "bag created");
        Ok(bag)
    }

    /// Deletes a bag along with the cuboids it holds.
    #[tracing::instrument(skip(self))]
    pub async fn delete_bag(&self, id: BagId) -> Result<(), DomainError> {
        let bag = lookup::find_bag(&self.store, id).await?;

        self.store
            .delete_bag(bag.id)
            .await
            .map_err(DomainError::from_write)?;

        metrics::counter!("bags_deleted_total").increment(1);
        tracing::info!(bag_id = %id, cuboids = bag.cuboids.len(), "bag deleted");
        Ok(())
    }
}

fn check_assignment(
    candidate: &Dimensions,
    bag: &Bag,
    replacing: Option<CuboidId>,
) -> Result<(), DomainError> {
    validate_assignment(candidate, bag, replacing).map_err(|rejection| {
        metrics::counter!("cuboid_rejections_total", "reason" => rejection.as_str()).increment(1);
        tracing::warn!(bag_id = %bag.id, %rejection, "cuboid assignment rejected");
        DomainError::Rejected(rejection)
    })
}
