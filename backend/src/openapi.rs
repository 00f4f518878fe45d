//! OpenAPI document for the HTTP API

use axum::Json;
use utoipa::OpenApi;

use crate::error::{ErrorDetail, ErrorResponse};
use crate::handlers::{catalog, health, inventory, sales};
use crate::services::catalog::{Category, CreateCategoryInput, CreateProductInput, Product};
use crate::services::inventory::{CreateInventoryInput, Inventory, InventoryChange};
use crate::services::sales::{CategoryRevenue, Revenue, RevenueComparison, Sale, SaleLineInput};

#[derive(OpenApi)]
#[openapi(
    info(title = "Inventory & Sales API"),
    paths(
        health::health_check,
        health::ping,
        catalog::create_category,
        catalog::list_categories,
        catalog::create_product,
        catalog::list_products,
        inventory::create_inventory,
        inventory::list_inventory,
        inventory::adjust_stock,
        inventory::list_inventory_changes,
        sales::create_sales,
        sales::list_sales,
        sales::list_all_sales,
        sales::calculate_revenue,
        sales::compare_revenue,
    ),
    components(schemas(
        health::HealthResponse,
        health::PingResponse,
        Category,
        CreateCategoryInput,
        Product,
        CreateProductInput,
        Inventory,
        InventoryChange,
        CreateInventoryInput,
        Sale,
        SaleLineInput,
        Revenue,
        CategoryRevenue,
        RevenueComparison,
        ErrorResponse,
        ErrorDetail,
    )),
    tags(
        (name = "health"),
        (name = "catalog", description = "Categories and products"),
        (name = "inventory", description = "Stock levels and their change log"),
        (name = "sales", description = "Sales and revenue reporting"),
    )
)]
pub struct ApiDoc;

/// Serve the generated document
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
