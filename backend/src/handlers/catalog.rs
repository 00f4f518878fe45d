//! HTTP handlers for categories and products

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use shared::PageRequest;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::error::{AppError, AppResult, ErrorResponse};
use crate::extract::{AppJson, AppQuery};
use crate::services::catalog::{
    CatalogService, Category, CreateCategoryInput, CreateProductInput, Product,
};
use crate::AppState;

/// Create a category
#[utoipa::path(
    post,
    path = "/api/v1/category",
    tag = "catalog",
    request_body = CreateCategoryInput,
    responses(
        (status = 201, body = Category),
        (status = 400, body = ErrorResponse),
        (status = 409, description = "Category name already exists", body = ErrorResponse)
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateCategoryInput>,
) -> AppResult<(StatusCode, Json<Category>)> {
    let service = CatalogService::new(state.db);
    let category = service.create_category(input).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// List categories (`limit` defaults to 10, at most 50)
#[utoipa::path(
    get,
    path = "/api/v1/category",
    tag = "catalog",
    params(
        ("limit" = Option<i64>, Query, description = "Page size, 0 to 50"),
        ("offset" = Option<i64>, Query, description = "Rows to skip")
    ),
    responses((status = 200, body = [Category]), (status = 400, body = ErrorResponse))
)]
pub async fn list_categories(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PageRequest>,
) -> AppResult<Json<Vec<Category>>> {
    let page = query
        .resolve()
        .map_err(|message| AppError::validation("limit/offset", message))?;

    let service = CatalogService::new(state.db);
    let categories = service.list_categories(page).await?;
    Ok(Json(categories))
}

/// Register a product
#[utoipa::path(
    post,
    path = "/api/v1/product",
    tag = "catalog",
    request_body = CreateProductInput,
    responses(
        (status = 201, body = Product),
        (status = 400, body = ErrorResponse),
        (status = 404, description = "Category not found", body = ErrorResponse)
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateProductInput>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let service = CatalogService::new(state.db);
    let product = service.create_product(input).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

/// Query parameters for listing products
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListProductsQuery {
    pub category_id: Option<Uuid>,
}

/// List products, optionally filtered by category
#[utoipa::path(
    get,
    path = "/api/v1/product",
    tag = "catalog",
    params(ListProductsQuery),
    responses((status = 200, body = [Product]))
)]
pub async fn list_products(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListProductsQuery>,
) -> AppResult<Json<Vec<Product>>> {
    let service = CatalogService::new(state.db);
    let products = service.list_products(query.category_id).await?;
    Ok(Json(products))
}
