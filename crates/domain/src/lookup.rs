//! Fetch-by-id lookups that keep "absent" apart from "storage failed".

use store::{Bag, BagId, Cuboid, CuboidId, InventoryStore, InventoryStoreExt};

use crate::error::DomainError;

/// Resolves a bag with its cuboids loaded.
pub async fn find_bag<S>(store: &S, id: BagId) -> Result<Bag, DomainError>
where
    S: InventoryStore + ?Sized,
{
    store.find_bag(id).await.map_err(DomainError::from_lookup)
}

/// Resolves a cuboid with its bag and the bag's cuboids loaded.
pub async fn find_cuboid<S>(store: &S, id: CuboidId) -> Result<Cuboid, DomainError>
where
    S: InventoryStore + ?Sized,
{
    store.find_cuboid(id).await.map_err(DomainError::from_lookup)
}
