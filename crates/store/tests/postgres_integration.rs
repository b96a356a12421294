//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency.
//! Run with:
//!
//! ```bash
//! cargo test -p store --test postgres_integration -- --test-threads=1
//! ```

use std::sync::Arc;

use serial_test::serial;
use sqlx::PgPool;
use store::{
    BagId, Dimensions, InventoryStore, InventoryStoreExt, NewBag, NewCuboid, PostgresStore,
    StoreError,
};
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            // Migrations go through the store itself so the embedded set is exercised
            let temp_pool = PgPool::connect(&connection_string).await.unwrap();
            PostgresStore::new(temp_pool.clone())
                .run_migrations()
                .await
                .unwrap();
            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool and cleared tables
async fn get_test_store() -> PostgresStore {
    let info = get_container_info().await;

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    let store = PostgresStore::new(pool);
    sqlx::query("TRUNCATE TABLE cuboids, bags RESTART IDENTITY")
        .execute(store.pool())
        .await
        .unwrap();

    store
}

#[tokio::test]
#[serial]
async fn insert_and_get_bag() {
    let store = get_test_store().await;

    let bag = store
        .insert_bag(NewBag::new("suitcase", 100))
        .await
        .unwrap();
    assert_eq!(bag.id, BagId::new(1));
    assert!(!bag.disabled);

    let loaded = store.find_bag(bag.id).await.unwrap();
    assert_eq!(loaded.title, "suitcase");
    assert_eq!(loaded.capacity, 100);
    assert!(loaded.cuboids.is_empty());
}

#[tokio::test]
#[serial]
async fn get_missing_bag_returns_none() {
    let store = get_test_store().await;

    assert!(store.get_bag(BagId::new(999)).await.unwrap().is_none());
    let err = store.find_bag(BagId::new(999)).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
#[serial]
async fn insert_bag_rejects_invalid_fields() {
    let store = get_test_store().await;

    let err = store.insert_bag(NewBag::new("", 0)).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
    assert!(store.list_bags().await.unwrap().is_empty());
}

#[tokio::test]
#[serial]
async fn get_cuboid_loads_bag_with_cuboids() {
    let store = get_test_store().await;
    let bag = store.insert_bag(NewBag::new("crate", 100)).await.unwrap();

    let first = store
        .insert_cuboid(NewCuboid::new(bag.id, Dimensions::new(2, 2, 2)))
        .await
        .unwrap();
    store
        .insert_cuboid(NewCuboid::new(bag.id, Dimensions::new(1, 2, 3)))
        .await
        .unwrap();

    let cuboid = store.find_cuboid(first.id).await.unwrap();
    assert_eq!(cuboid.dimensions, Dimensions::new(2, 2, 2));

    let loaded_bag = cuboid.bag.unwrap();
    assert_eq!(loaded_bag.id, bag.id);
    assert_eq!(loaded_bag.cuboids.len(), 2);
}

#[tokio::test]
#[serial]
async fn list_bags_groups_cuboids() {
    let store = get_test_store().await;
    let a = store.insert_bag(NewBag::new("a", 100)).await.unwrap();
    let b = store.insert_bag(NewBag::new("b", 100)).await.unwrap();

    for _ in 0..2 {
        store
            .insert_cuboid(NewCuboid::new(a.id, Dimensions::new(1, 1, 1)))
            .await
            .unwrap();
    }
    store
        .insert_cuboid(NewCuboid::new(b.id, Dimensions::new(1, 1, 1)))
        .await
        .unwrap();

    let bags = store.list_bags().await.unwrap();
    assert_eq!(bags.len(), 2);
    assert_eq!(bags[0].cuboids.len(), 2);
    assert_eq!(bags[1].cuboids.len(), 1);

    let cuboids = store.list_cuboids().await.unwrap();
    assert_eq!(cuboids.len(), 3);
    assert!(cuboids.iter().all(|c| c.bag.is_none()));
}

#[tokio::test]
#[serial]
async fn insert_cuboid_for_unknown_bag_is_a_validation_error() {
    let store = get_test_store().await;

    let err = store
        .insert_cuboid(NewCuboid::new(BagId::new(42), Dimensions::new(1, 1, 1)))
        .await
        .unwrap_err();

    match err {
        StoreError::Validation(errors) => assert_eq!(errors.errors()[0].field, "bag_id"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[tokio::test]
#[serial]
async fn insert_cuboid_rejects_non_positive_dimensions() {
    let store = get_test_store().await;
    let bag = store.insert_bag(NewBag::new("box", 10)).await.unwrap();

    let err = store
        .insert_cuboid(NewCuboid::new(bag.id, Dimensions::new(1, -1, 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));
}

#[tokio::test]
#[serial]
async fn update_cuboid_persists_changes() {
    let store = get_test_store().await;
    let bag = store.insert_bag(NewBag::new("box", 100)).await.unwrap();
    let other = store.insert_bag(NewBag::new("other", 100)).await.unwrap();

    let mut cuboid = store
        .insert_cuboid(NewCuboid::new(bag.id, Dimensions::new(1, 1, 1)))
        .await
        .unwrap();
    cuboid.bag_id = other.id;
    cuboid.dimensions = Dimensions::new(4, 4, 4);

    let updated = store.update_cuboid(&cuboid).await.unwrap();
    assert_eq!(updated.bag_id, other.id);
    assert_eq!(updated.dimensions, Dimensions::new(4, 4, 4));
    assert!(updated.updated_at >= cuboid.updated_at);

    let reloaded = store.find_cuboid(cuboid.id).await.unwrap();
    assert_eq!(reloaded.bag.unwrap().id, other.id);
}

#[tokio::test]
#[serial]
async fn delete_cuboid_and_missing_delete() {
    let store = get_test_store().await;
    let bag = store.insert_bag(NewBag::new("box", 100)).await.unwrap();
    let cuboid = store
        .insert_cuboid(NewCuboid::new(bag.id, Dimensions::new(1, 1, 1)))
        .await
        .unwrap();

    store.delete_cuboid(cuboid.id).await.unwrap();
    assert!(store.get_cuboid(cuboid.id).await.unwrap().is_none());

    let err = store.delete_cuboid(cuboid.id).await.unwrap_err();
    assert!(matches!(err, StoreError::CuboidNotFound(_)));
}

#[tokio::test]
#[serial]
async fn delete_bag_cascades() {
    let store = get_test_store().await;
    let bag = store.insert_bag(NewBag::new("box", 100)).await.unwrap();
    let cuboid = store
        .insert_cuboid(NewCuboid::new(bag.id, Dimensions::new(1, 1, 1)))
        .await
        .unwrap();

    store.delete_bag(bag.id).await.unwrap();
    assert!(store.get_bag(bag.id).await.unwrap().is_none());
    assert!(store.get_cuboid(cuboid.id).await.unwrap().is_none());
}
