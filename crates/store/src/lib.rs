pub mod error;
pub mod memory;
pub mod postgres;
pub mod record;
pub mod store;

pub use common::{BagId, CuboidId};
pub use error::{FieldError, Result, StoreError, ValidationErrors};
pub use memory::InMemoryStore;
pub use postgres::PostgresStore;
pub use record::{Bag, Cuboid, Dimensions, NewBag, NewCuboid};
pub use store::{InventoryStore, InventoryStoreExt};

pub use sqlx;
