//! Sales service: recording sale batches and revenue reporting

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{
    plan_sale_batch, validate_amount, Page, SaleDemand, StockLevel, TimeWindow, UnitOfMeasure,
};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::db::{active, push_active, push_window};
use crate::error::{AppError, AppResult};
use crate::services::catalog::Product;
use crate::services::inventory::write_stock;

/// Sales service for recording sales and computing revenue
#[derive(Clone)]
pub struct SalesService {
    db: PgPool,
}

/// One line of a sale batch
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct SaleLineInput {
    pub product_id: Uuid,
    #[validate(range(min = 1))]
    pub quantity: i32,
    #[validate(custom = "validate_amount")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
}

/// Sale record with its product attached
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Sale {
    pub id: Uuid,
    pub quantity: i32,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub amount: Decimal,
    pub product: Product,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// Row for the sale/product join
#[derive(Debug, FromRow)]
struct SaleRow {
    id: Uuid,
    quantity: i32,
    amount: Decimal,
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
    is_active: bool,
    product_id: Uuid,
    product_name: String,
    product_description: Option<String>,
    product_price: Decimal,
    product_currency: String,
    #[sqlx(try_from = "String")]
    product_unit: UnitOfMeasure,
    product_category_id: Option<Uuid>,
    product_created_at: DateTime<Utc>,
    product_updated_at: Option<DateTime<Utc>>,
    product_is_active: bool,
}

impl From<SaleRow> for Sale {
    fn from(row: SaleRow) -> Self {
        Self {
            id: row.id,
            quantity: row.quantity,
            amount: row.amount,
            product: Product {
                id: row.product_id,
                name: row.product_name,
                description: row.product_description,
                price: row.product_price,
                currency: row.product_currency,
                unit: row.product_unit,
                category_id: row.product_category_id,
                created_at: row.product_created_at,
                updated_at: row.product_updated_at,
                is_active: row.product_is_active,
            },
            created_at: row.created_at,
            updated_at: row.updated_at,
            is_active: row.is_active,
        }
    }
}

/// Revenue summed over one window
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Revenue {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub revenue: Decimal,
}

/// Revenue of one category over a window
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct CategoryRevenue {
    pub category_id: Uuid,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub total_revenue: Decimal,
}

/// Category revenue comparison
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RevenueComparison {
    pub revenue_comparison: Vec<CategoryRevenue>,
}

const SALE_SELECT: &str = r#"
    SELECT s.id, s.quantity, s.amount, s.created_at, s.updated_at, s.is_active,
           p.id AS product_id, p.name AS product_name, p.description AS product_description,
           p.price AS product_price, p.currency AS product_currency, p.unit AS product_unit,
           p.category_id AS product_category_id, p.created_at AS product_created_at,
           p.updated_at AS product_updated_at, p.is_active AS product_is_active
    FROM sales s
    JOIN products p ON p.id = s.product_id
"#;

impl SalesService {
    /// Create a new SalesService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Record a batch of sales, all or nothing.
    ///
    /// Inventory rows for every product in the batch are locked before the
    /// stock check, so concurrent batches on the same product serialize.
    #[tracing::instrument(skip(self, lines), fields(lines = lines.len()))]
    pub async fn record_sales(&self, lines: Vec<SaleLineInput>) -> AppResult<Vec<Sale>> {
        for line in &lines {
            line.validate()?;
        }
        if lines.is_empty() {
            return Ok(Vec::new());
        }

        let demands: Vec<SaleDemand> = lines
            .iter()
            .map(|line| SaleDemand {
                product_id: line.product_id,
                quantity: line.quantity,
            })
            .collect();

        let mut product_ids: Vec<Uuid> = demands.iter().map(|d| d.product_id).collect();
        product_ids.sort();
        product_ids.dedup();

        let mut tx = self.db.begin().await?;

        let levels: Vec<StockLevel> = sqlx::query_as::<_, (Uuid, Uuid, i32)>(&format!(
            "SELECT i.id, i.product_id, i.stock_quantity FROM inventory i \
             WHERE i.product_id = ANY($1) AND {} ORDER BY i.id FOR UPDATE",
            active("i")
        ))
        .bind(&product_ids)
        .fetch_all(&mut *tx)
        .await?
        .into_iter()
        .map(|(inventory_id, product_id, stock_quantity)| StockLevel {
            inventory_id,
            product_id,
            stock_quantity,
        })
        .collect();

        // Validation pass: nothing has been written yet
        let plan = plan_sale_batch(&levels, &demands).map_err(|err| {
            tracing::warn!(product_id = %err.product_id(), %err, "sale batch rejected");
            AppError::from(err)
        })?;

        let mut sale_ids = Vec::with_capacity(plan.len());
        for step in &plan {
            let line = &lines[step.line_index];
            write_stock(&mut *tx, step.inventory_id, step.change).await?;

            let sale_id = Uuid::new_v4();
            sqlx::query(
                r#"
                INSERT INTO sales (id, product_id, quantity, amount)
                VALUES ($1, $2, $3, $4)
                "#,
            )
            .bind(sale_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .bind(line.amount)
            .execute(&mut *tx)
            .await?;

            sale_ids.push(sale_id);
        }

        let mut qb = QueryBuilder::<Postgres>::new(SALE_SELECT);
        qb.push(" WHERE s.id = ANY(").push_bind(sale_ids.clone()).push(")");
        let rows = qb.build_query_as::<SaleRow>().fetch_all(&mut *tx).await?;

        tx.commit().await?;

        let mut by_id: HashMap<Uuid, Sale> = rows
            .into_iter()
            .map(Sale::from)
            .map(|sale| (sale.id, sale))
            .collect();
        let sales: Vec<Sale> = sale_ids.iter().filter_map(|id| by_id.remove(id)).collect();

        tracing::info!(recorded = sales.len(), "sale batch recorded");
        Ok(sales)
    }

    /// Active sales inside a window, optionally for one product or category
    pub async fn list_sales(
        &self,
        window: &TimeWindow,
        product_id: Option<Uuid>,
        category_id: Option<Uuid>,
    ) -> AppResult<Vec<Sale>> {
        let mut qb = QueryBuilder::<Postgres>::new(SALE_SELECT);
        qb.push(" WHERE ");
        push_window(&mut qb, "s.created_at", window);
        qb.push(" AND ");
        push_active(&mut qb, "s");
        if let Some(product_id) = product_id {
            qb.push(" AND s.product_id = ").push_bind(product_id);
        }
        if let Some(category_id) = category_id {
            qb.push(" AND p.category_id = ").push_bind(category_id);
        }
        qb.push(" ORDER BY s.created_at, s.id");

        let rows = qb.build_query_as::<SaleRow>().fetch_all(&self.db).await?;
        Ok(rows.into_iter().map(Sale::from).collect())
    }

    /// Every sale, paginated, without a visibility filter
    pub async fn list_all_sales(&self, page: Page) -> AppResult<Vec<Sale>> {
        let mut qb = QueryBuilder::<Postgres>::new(SALE_SELECT);
        qb.push(" ORDER BY s.created_at, s.id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let rows = qb.build_query_as::<SaleRow>().fetch_all(&self.db).await?;
        Ok(rows.into_iter().map(Sale::from).collect())
    }

    /// Sum of active sale amounts inside a window; zero when nothing matches
    #[tracing::instrument(skip(self))]
    pub async fn compute_revenue(&self, window: &TimeWindow) -> AppResult<Revenue> {
        let mut qb = QueryBuilder::<Postgres>::new("SELECT COALESCE(SUM(s.amount), 0) FROM sales s WHERE ");
        push_window(&mut qb, "s.created_at", window);
        qb.push(" AND ");
        push_active(&mut qb, "s");

        let revenue = qb.build_query_scalar::<Decimal>().fetch_one(&self.db).await?;
        Ok(Revenue { revenue })
    }

    /// Revenue per category inside a window.
    /// Categories without a qualifying sale are absent.
    #[tracing::instrument(skip(self))]
    pub async fn compare_revenue(&self, window: &TimeWindow) -> AppResult<RevenueComparison> {
        let mut qb = QueryBuilder::<Postgres>::new(
            r#"
            SELECT c.id AS category_id, SUM(s.amount) AS total_revenue
            FROM sales s
            JOIN products p ON p.id = s.product_id
            JOIN categories c ON c.id = p.category_id
            WHERE "#,
        );
        push_window(&mut qb, "s.created_at", window);
        qb.push(" AND ");
        push_active(&mut qb, "s");
        qb.push(" GROUP BY c.id ORDER BY total_revenue DESC, c.id");

        let revenue_comparison = qb
            .build_query_as::<CategoryRevenue>()
            .fetch_all(&self.db)
            .await?;

        Ok(RevenueComparison { revenue_comparison })
    }
}
