use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};

use crate::{
    Bag, BagId, Cuboid, CuboidId, Dimensions, NewBag, NewCuboid, Result, StoreError,
    ValidationErrors,
    store::{InventoryStore, unknown_bag, validate_dimensions, validate_new_bag},
};

const BAG_COLUMNS: &str = "id, title, capacity, disabled, created_at, updated_at";
const CUBOID_COLUMNS: &str = "id, bag_id, length, width, height, created_at, updated_at";

/// PostgreSQL-backed inventory store implementation.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL inventory store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        tracing::info!("database migrations applied");
        Ok(())
    }

    fn row_to_bag(row: PgRow) -> Result<Bag> {
        Ok(Bag {
            id: BagId::new(row.try_get("id")?),
            title: row.try_get("title")?,
            capacity: row.try_get("capacity")?,
            disabled: row.try_get("disabled")?,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            cuboids: Vec::new(),
        })
    }

    fn row_to_cuboid(row: PgRow) -> Result<Cuboid> {
        Ok(Cuboid {
            id: CuboidId::new(row.try_get("id")?),
            bag_id: BagId::new(row.try_get("bag_id")?),
            dimensions: Dimensions {
                length: row.try_get("length")?,
                width: row.try_get("width")?,
                height: row.try_get("height")?,
            },
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            bag: None,
        })
    }

    async fn cuboids_in_bag(&self, bag_id: BagId) -> Result<Vec<Cuboid>> {
        let rows = sqlx::query(&format!(
            "SELECT {CUBOID_COLUMNS} FROM cuboids WHERE bag_id = $1 ORDER BY id ASC"
        ))
        .bind(bag_id.as_i64())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Self::row_to_cuboid).collect()
    }
}

/// Maps a violated schema constraint to the field error it stands for.
///
/// The Rust-side checks run first, so these only fire when a row changed
/// underneath us (e.g. the bag was deleted concurrently).
fn constraint_violation(err: sqlx::Error, bag_id: Option<BagId>) -> StoreError {
    if let sqlx::Error::Database(ref db_err) = err
        && let Some(constraint) = db_err.constraint()
    {
        let errors = match constraint {
            "cuboids_bag_id_fkey" => bag_id.map(unknown_bag),
            "cuboids_length_positive" => Some(ValidationErrors::single(
                "length",
                "must be greater than zero",
            )),
            "cuboids_width_positive" => Some(ValidationErrors::single(
                "width",
                "must be greater than zero",
            )),
            "cuboids_height_positive" => Some(ValidationErrors::single(
                "height",
                "must be greater than zero",
            )),
            "bags_title_not_empty" => Some(ValidationErrors::single("title", "is required")),
            "bags_capacity_positive" => Some(ValidationErrors::single(
                "capacity",
                "must be greater than zero",
            )),
            _ => None,
        };
        if let Some(errors) = errors {
            return StoreError::Validation(errors);
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl InventoryStore for PostgresStore {
    async fn get_bag(&self, id: BagId) -> Result<Option<Bag>> {
        let row: Option<PgRow> =
            sqlx::query(&format!("SELECT {BAG_COLUMNS} FROM bags WHERE id = $1"))
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some(row) => {
                let mut bag = Self::row_to_bag(row)?;
                bag.cuboids = self.cuboids_in_bag(id).await?;
                Ok(Some(bag))
            }
            None => Ok(None),
        }
    }

    async fn list_bags(&self) -> Result<Vec<Bag>> {
        let bag_rows = sqlx::query(&format!("SELECT {BAG_COLUMNS} FROM bags ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await?;
        let cuboid_rows =
            sqlx::query(&format!("SELECT {CUBOID_COLUMNS} FROM cuboids ORDER BY id ASC"))
                .fetch_all(&self.pool)
                .await?;

        let mut by_bag: HashMap<BagId, Vec<Cuboid>> = HashMap::new();
        for row in cuboid_rows {
            let cuboid = Self::row_to_cuboid(row)?;
            by_bag.entry(cuboid.bag_id).or_default().push(cuboid);
        }

        bag_rows
            .into_iter()
            .map(|row| {
                let mut bag = Self::row_to_bag(row)?;
                bag.cuboids = by_bag.remove(&bag.id).unwrap_or_default();
                Ok(bag)
            })
            .collect()
    }

    async fn insert_bag(&self, bag: NewBag) -> Result<Bag> {
        validate_new_bag(&bag)?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO bags (title, capacity, disabled)
            VALUES ($1, $2, $3)
            RETURNING {BAG_COLUMNS}
            "#
        ))
        .bind(&bag.title)
        .bind(bag.capacity)
        .bind(bag.disabled)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| constraint_violation(e, None))?;

        Self::row_to_bag(row)
    }

    async fn delete_bag(&self, id: BagId) -> Result<()> {
        let result = sqlx::query("DELETE FROM bags WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::BagNotFound(id));
        }
        tracing::debug!(bag_id = %id, "bag row deleted, cuboids cascaded");
        Ok(())
    }

    async fn get_cuboid(&self, id: CuboidId) -> Result<Option<Cuboid>> {
        let row: Option<PgRow> =
            sqlx::query(&format!("SELECT {CUBOID_COLUMNS} FROM cuboids WHERE id = $1"))
                .bind(id.as_i64())
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some(row) => {
                let mut cuboid = Self::row_to_cuboid(row)?;
                cuboid.bag = self.get_bag(cuboid.bag_id).await?.map(Box::new);
                Ok(Some(cuboid))
            }
            None => Ok(None),
        }
    }

    async fn list_cuboids(&self) -> Result<Vec<Cuboid>> {
        let rows = sqlx::query(&format!("SELECT {CUBOID_COLUMNS} FROM cuboids ORDER BY id ASC"))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_cuboid).collect()
    }

    async fn insert_cuboid(&self, cuboid: NewCuboid) -> Result<Cuboid> {
        validate_dimensions(&cuboid.dimensions)?;

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO cuboids (bag_id, length, width, height)
            VALUES ($1, $2, $3, $4)
            RETURNING {CUBOID_COLUMNS}
            "#
        ))
        .bind(cuboid.bag_id.as_i64())
        .bind(cuboid.dimensions.length)
        .bind(cuboid.dimensions.width)
        .bind(cuboid.dimensions.height)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| constraint_violation(e, Some(cuboid.bag_id)))?;

        Self::row_to_cuboid(row)
    }

    async fn update_cuboid(&self, cuboid: &Cuboid) -> Result<Cuboid> {
        validate_dimensions(&cuboid.dimensions)?;

        let row: Option<PgRow> = sqlx::query(&format!(
            r#"
            UPDATE cuboids
            SET bag_id = $2, length = $3, width = $4, height = $5, updated_at = NOW()
            WHERE id = $1
            RETURNING {CUBOID_COLUMNS}
            "#
        ))
        .bind(cuboid.id.as_i64())
        .bind(cuboid.bag_id.as_i64())
        .bind(cuboid.dimensions.length)
        .bind(cuboid.dimensions.width)
        .bind(cuboid.dimensions.height)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| constraint_violation(e, Some(cuboid.bag_id)))?;

        match row {
            Some(row) => Self::row_to_cuboid(row),
            None => Err(StoreError::CuboidNotFound(cuboid.id)),
        }
    }

    async fn delete_cuboid(&self, id: CuboidId) -> Result<()> {
        let result = sqlx::query("DELETE FROM cuboids WHERE id = $1")
            .bind(id.as_i64())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::CuboidNotFound(id));
        }
        Ok(())
    }
}
