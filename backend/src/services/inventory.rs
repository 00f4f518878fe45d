//! Inventory service for stock levels and their change log
//!
//! Every write to `inventory.stock_quantity` happens inside a transaction
//! that first locks the row (`FOR UPDATE`) and then appends exactly one
//! `inventory_changes` row with the before/after values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{apply_adjustment, StockChange};
use sqlx::{FromRow, PgConnection, PgPool, Postgres, QueryBuilder};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::db::{active, map_constraint_violation, push_active};
use crate::services::CatalogService;
use crate::error::{AppError, AppResult};

/// Inventory service for managing stock levels
#[derive(Clone)]
pub struct InventoryService {
    db: PgPool,
}

/// Inventory record, one per product
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Inventory {
    pub id: Uuid,
    pub product_id: Uuid,
    pub stock_quantity: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// Immutable audit row for one stock mutation
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct InventoryChange {
    pub id: Uuid,
    pub inventory_id: Uuid,
    pub old_stock: i32,
    pub current_stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// Input for opening an inventory record
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateInventoryInput {
    pub product_id: Uuid,
    #[validate(range(min = 0))]
    pub stock_quantity: i32,
}

pub(crate) const INVENTORY_COLUMNS: &str =
    "i.id, i.product_id, i.stock_quantity, i.created_at, i.updated_at, i.is_active";

const CHANGE_COLUMNS: &str =
    "ic.id, ic.inventory_id, ic.old_stock, ic.current_stock, ic.created_at, ic.updated_at, ic.is_active";

impl InventoryService {
    /// Create a new InventoryService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Open the inventory record for an active product
    #[tracing::instrument(skip(self, input), fields(product_id = %input.product_id))]
    pub async fn create_inventory(&self, input: CreateInventoryInput) -> AppResult<Inventory> {
        input.validate()?;

        let catalog = CatalogService::new(self.db.clone());
        if !catalog.product_exists(input.product_id).await? {
            return Err(AppError::NotFound("Product".to_string()));
        }

        let inventory = sqlx::query_as::<_, Inventory>(
            r#"
            INSERT INTO inventory (id, product_id, stock_quantity)
            VALUES ($1, $2, $3)
            RETURNING id, product_id, stock_quantity, created_at, updated_at, is_active
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.product_id)
        .bind(input.stock_quantity)
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_constraint_violation(e, "inventory for this product", "Product"))?;

        tracing::info!(
            inventory_id = %inventory.id,
            stock_quantity = inventory.stock_quantity,
            "inventory opened"
        );
        Ok(inventory)
    }

    /// List active inventory, optionally only rows at or under a threshold
    pub async fn list_inventory(&self, low_stock_threshold: Option<i32>) -> AppResult<Vec<Inventory>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {INVENTORY_COLUMNS} FROM inventory i WHERE "
        ));
        push_active(&mut qb, "i");
        if let Some(threshold) = low_stock_threshold {
            qb.push(" AND i.stock_quantity <= ").push_bind(threshold);
        }
        qb.push(" ORDER BY i.stock_quantity, i.id");

        let rows = qb.build_query_as::<Inventory>().fetch_all(&self.db).await?;
        Ok(rows)
    }

    /// Add a signed delta to a product's stock and log the change.
    ///
    /// No floor is applied here; only sales refuse to oversell.
    #[tracing::instrument(skip(self))]
    pub async fn adjust_stock(&self, product_id: Uuid, delta: i32) -> AppResult<Inventory> {
        let mut tx = self.db.begin().await?;

        let current = lock_inventory_for_product(&mut *tx, product_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Product".to_string()))?;

        let change = apply_adjustment(current.stock_quantity, delta)?;
        let updated = write_stock(&mut *tx, current.id, change).await?;

        tx.commit().await?;

        tracing::info!(
            inventory_id = %updated.id,
            old_stock = change.old_stock,
            current_stock = change.current_stock,
            "stock adjusted"
        );
        Ok(updated)
    }

    /// All change rows for an inventory record, oldest first.
    /// Soft-deleted change rows are included.
    pub async fn list_changes(&self, inventory_id: Uuid) -> AppResult<Vec<InventoryChange>> {
        let changes = sqlx::query_as::<_, InventoryChange>(&format!(
            "SELECT {CHANGE_COLUMNS} FROM inventory_changes ic \
             WHERE ic.inventory_id = $1 ORDER BY ic.created_at, ic.id"
        ))
        .bind(inventory_id)
        .fetch_all(&self.db)
        .await?;

        Ok(changes)
    }
}

/// Lock the active inventory row of a product for the rest of the transaction
async fn lock_inventory_for_product(
    conn: &mut PgConnection,
    product_id: Uuid,
) -> AppResult<Option<Inventory>> {
    let row = sqlx::query_as::<_, Inventory>(&format!(
        "SELECT {INVENTORY_COLUMNS} FROM inventory i WHERE i.product_id = $1 AND {} FOR UPDATE",
        active("i")
    ))
    .bind(product_id)
    .fetch_optional(conn)
    .await?;

    Ok(row)
}

/// Persist a new stock level together with its audit row.
///
/// Callers must hold the row lock and run inside a transaction.
pub(crate) async fn write_stock(
    conn: &mut PgConnection,
    inventory_id: Uuid,
    change: StockChange,
) -> AppResult<Inventory> {
    let updated = sqlx::query_as::<_, Inventory>(
        r#"
        UPDATE inventory
        SET stock_quantity = $1, updated_at = NOW()
        WHERE id = $2
        RETURNING id, product_id, stock_quantity, created_at, updated_at, is_active
        "#,
    )
    .bind(change.current_stock)
    .bind(inventory_id)
    .fetch_one(&mut *conn)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO inventory_changes (id, inventory_id, old_stock, current_stock)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(inventory_id)
    .bind(change.old_stock)
    .bind(change.current_stock)
    .execute(&mut *conn)
    .await?;

    Ok(updated)
}
