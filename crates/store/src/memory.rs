use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::{
    Bag, BagId, Cuboid, CuboidId, NewBag, NewCuboid, Result, StoreError,
    store::{InventoryStore, unknown_bag, validate_dimensions, validate_new_bag},
};

#[derive(Default)]
struct Tables {
    bags: BTreeMap<BagId, Bag>,
    cuboids: BTreeMap<CuboidId, Cuboid>,
    last_bag_id: i64,
    last_cuboid_id: i64,
}

impl Tables {
    /// Copies a bag row and attaches its current cuboids.
    fn load_bag(&self, bag: &Bag) -> Bag {
        let mut bag = bag.clone();
        bag.cuboids = self
            .cuboids
            .values()
            .filter(|c| c.bag_id == bag.id)
            .cloned()
            .collect();
        bag
    }
}

/// In-memory inventory store.
///
/// Mirrors the constraints of the PostgreSQL schema: ids are assigned
/// sequentially, field constraints are validated on write, cuboids must
/// reference an existing bag and deleting a bag cascades to its cuboids.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    /// Creates a new empty in-memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of cuboids stored.
    pub async fn cuboid_count(&self) -> usize {
        self.tables.read().await.cuboids.len()
    }
}

#[async_trait]
impl InventoryStore for InMemoryStore {
    async fn get_bag(&self, id: BagId) -> Result<Option<Bag>> {
        let tables = self.tables.read().await;
        Ok(tables.bags.get(&id).map(|bag| tables.load_bag(bag)))
    }

    async fn list_bags(&self) -> Result<Vec<Bag>> {
        let tables = self.tables.read().await;
        Ok(tables.bags.values().map(|bag| tables.load_bag(bag)).collect())
    }

    async fn insert_bag(&self, bag: NewBag) -> Result<Bag> {
        validate_new_bag(&bag)?;

        let mut tables = self.tables.write().await;
        tables.last_bag_id += 1;
        let now = Utc::now();
        let record = Bag {
            id: BagId::new(tables.last_bag_id),
            title: bag.title,
            capacity: bag.capacity,
            disabled: bag.disabled,
            created_at: now,
            updated_at: now,
            cuboids: Vec::new(),
        };
        tables.bags.insert(record.id, record.clone());
        Ok(record)
    }

    async fn delete_bag(&self, id: BagId) -> Result<()> {
        let mut tables = self.tables.write().await;
        if tables.bags.remove(&id).is_none() {
            return Err(StoreError::BagNotFound(id));
        }
        tables.cuboids.retain(|_, c| c.bag_id != id);
        Ok(())
    }

    async fn get_cuboid(&self, id: CuboidId) -> Result<Option<Cuboid>> {
        let tables = self.tables.read().await;
        let Some(cuboid) = tables.cuboids.get(&id) else {
            return Ok(None);
        };

        let mut cuboid = cuboid.clone();
        cuboid.bag = tables
            .bags
            .get(&cuboid.bag_id)
            .map(|bag| Box::new(tables.load_bag(bag)));
        Ok(Some(cuboid))
    }

    async fn list_cuboids(&self) -> Result<Vec<Cuboid>> {
        let tables = self.tables.read().await;
        Ok(tables.cuboids.values().cloned().collect())
    }

    async fn insert_cuboid(&self, cuboid: NewCuboid) -> Result<Cuboid> {
        validate_dimensions(&cuboid.dimensions)?;

        let mut tables = self.tables.write().await;
        if !tables.bags.contains_key(&cuboid.bag_id) {
            return Err(unknown_bag(cuboid.bag_id).into());
        }

        tables.last_cuboid_id += 1;
        let now = Utc::now();
        let record = Cuboid {
            id: CuboidId::new(tables.last_cuboid_id),
            bag_id: cuboid.bag_id,
            dimensions: cuboid.dimensions,
            created_at: now,
            updated_at: now,
            bag: None,
        };
        tables.cuboids.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_cuboid(&self, cuboid: &Cuboid) -> Result<Cuboid> {
        validate_dimensions(&cuboid.dimensions)?;

        let mut tables = self.tables.write().await;
        if !tables.bags.contains_key(&cuboid.bag_id) {
            return Err(unknown_bag(cuboid.bag_id).into());
        }

        let stored = tables
            .cuboids
            .get_mut(&cuboid.id)
            .ok_or(StoreError::CuboidNotFound(cuboid.id))?;
        stored.bag_id = cuboid.bag_id;
        stored.dimensions = cuboid.dimensions;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    async fn delete_cuboid(&self, id: CuboidId) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables
            .cuboids
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::CuboidNotFound(id))
    }
}
