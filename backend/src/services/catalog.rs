//! Catalog service for categories and products

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::{validate_amount, validate_not_blank, Page, UnitOfMeasure, DEFAULT_CURRENCY};
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::db::{active, map_constraint_violation, push_active};
use crate::error::{AppError, AppResult};

/// Catalog service for managing categories and products
#[derive(Clone)]
pub struct CatalogService {
    db: PgPool,
}

/// Category record
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// Input for creating a category
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryInput {
    #[validate(custom = "validate_not_blank")]
    pub name: String,
}

/// Product record
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub currency: String,
    #[sqlx(try_from = "String")]
    #[schema(value_type = String, example = "liter")]
    pub unit: UnitOfMeasure,
    pub category_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
    pub is_active: bool,
}

/// Input for registering a product
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProductInput {
    #[validate(custom = "validate_not_blank")]
    pub name: String,
    pub description: Option<String>,
    #[validate(custom = "validate_amount")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    #[serde(default)]
    #[schema(value_type = Option<String>, example = "unit")]
    pub unit: UnitOfMeasure,
    #[validate(length(equal = 3))]
    pub currency: Option<String>,
    pub category_id: Option<Uuid>,
}

const CATEGORY_COLUMNS: &str = "c.id, c.name, c.created_at, c.updated_at, c.is_active";

const PRODUCT_COLUMNS: &str = "p.id, p.name, p.description, p.price, p.currency, p.unit, \
                               p.category_id, p.created_at, p.updated_at, p.is_active";

impl CatalogService {
    /// Create a new CatalogService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Create a category with a unique name
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_category(&self, input: CreateCategoryInput) -> AppResult<Category> {
        input.validate()?;

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (id, name)
            VALUES ($1, $2)
            RETURNING id, name, created_at, updated_at, is_active
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.name.trim())
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_constraint_violation(e, "category name", "Category"))?;

        tracing::info!(category_id = %category.id, "category created");
        Ok(category)
    }

    /// List active categories, one page at a time
    pub async fn list_categories(&self, page: Page) -> AppResult<Vec<Category>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {CATEGORY_COLUMNS} FROM categories c WHERE "
        ));
        push_active(&mut qb, "c");
        qb.push(" ORDER BY c.created_at, c.id LIMIT ")
            .push_bind(page.limit)
            .push(" OFFSET ")
            .push_bind(page.offset);

        let categories = qb.build_query_as::<Category>().fetch_all(&self.db).await?;
        Ok(categories)
    }

    /// Whether an active category with this id exists
    pub async fn category_exists(&self, category_id: Uuid) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(&format!(
            "SELECT EXISTS(SELECT 1 FROM categories c WHERE c.id = $1 AND {})",
            active("c")
        ))
        .bind(category_id)
        .fetch_one(&self.db)
        .await?;

        Ok(exists)
    }

    /// Register a product, optionally under an active category
    #[tracing::instrument(skip(self, input), fields(name = %input.name))]
    pub async fn create_product(&self, input: CreateProductInput) -> AppResult<Product> {
        input.validate()?;

        if let Some(category_id) = input.category_id {
            if !self.category_exists(category_id).await? {
                return Err(AppError::NotFound("Category".to_string()));
            }
        }

        let currency = input
            .currency
            .as_deref()
            .map(str::to_uppercase)
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (id, name, description, price, currency, unit, category_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, name, description, price, currency, unit,
                      category_id, created_at, updated_at, is_active
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(input.name.trim())
        .bind(&input.description)
        .bind(input.price)
        .bind(&currency)
        .bind(input.unit.as_str())
        .bind(input.category_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| map_constraint_violation(e, "product", "Category"))?;

        tracing::info!(product_id = %product.id, unit = %product.unit, "product registered");
        Ok(product)
    }

    /// List active products, optionally within one category
    pub async fn list_products(&self, category_id: Option<Uuid>) -> AppResult<Vec<Product>> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {PRODUCT_COLUMNS} FROM products p WHERE "
        ));
        push_active(&mut qb, "p");
        if let Some(category_id) = category_id {
            qb.push(" AND p.category_id = ").push_bind(category_id);
        }
        qb.push(" ORDER BY p.created_at, p.id");

        let products = qb.build_query_as::<Product>().fetch_all(&self.db).await?;
        Ok(products)
    }

    /// Whether an active product with this id exists
    pub async fn product_exists(&self, product_id: Uuid) -> AppResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(&format!(
            "SELECT EXISTS(SELECT 1 FROM products p WHERE p.id = $1 AND {})",
            active("p")
        ))
        .bind(product_id)
        .fetch_one(&self.db)
        .await?;

        Ok(exists)
    }
}
