//! HTTP handlers for inventory endpoints

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::error::{AppResult, ErrorResponse};
use crate::extract::{AppJson, AppQuery};
use crate::services::inventory::{CreateInventoryInput, Inventory, InventoryChange, InventoryService};
use crate::AppState;

/// Open an inventory record for a product
#[utoipa::path(
    post,
    path = "/api/v1/inventory",
    tag = "inventory",
    request_body = CreateInventoryInput,
    responses(
        (status = 201, body = Inventory),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 409, description = "Product already has inventory", body = ErrorResponse)
    )
)]
pub async fn create_inventory(
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateInventoryInput>,
) -> AppResult<(StatusCode, Json<Inventory>)> {
    let service = InventoryService::new(state.db);
    let inventory = service.create_inventory(input).await?;
    Ok((StatusCode::CREATED, Json(inventory)))
}

/// Query parameters for viewing inventory
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListInventoryQuery {
    /// Only rows with stock at or under this level
    pub low_stock_threshold: Option<i32>,
}

/// View inventory, optionally only low-stock rows
#[utoipa::path(
    get,
    path = "/api/v1/inventory",
    tag = "inventory",
    params(ListInventoryQuery),
    responses((status = 200, body = [Inventory]))
)]
pub async fn list_inventory(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListInventoryQuery>,
) -> AppResult<Json<Vec<Inventory>>> {
    let service = InventoryService::new(state.db);
    let inventory = service.list_inventory(query.low_stock_threshold).await?;
    Ok(Json(inventory))
}

/// Query parameters for a stock adjustment
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AdjustStockQuery {
    pub product_id: Uuid,
    /// Signed change to apply
    #[serde(default)]
    pub quantity: i32,
}

/// Apply a signed stock adjustment to a product
#[utoipa::path(
    put,
    path = "/api/v1/inventory",
    tag = "inventory",
    params(AdjustStockQuery),
    responses(
        (status = 200, body = Inventory),
        (status = 404, description = "No inventory for product", body = ErrorResponse)
    )
)]
pub async fn adjust_stock(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<AdjustStockQuery>,
) -> AppResult<Json<Inventory>> {
    let service = InventoryService::new(state.db);
    let inventory = service.adjust_stock(query.product_id, query.quantity).await?;
    Ok(Json(inventory))
}

/// Query parameters for the change log
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct InventoryChangesQuery {
    pub inventory_id: Uuid,
}

/// Change history of one inventory record
#[utoipa::path(
    get,
    path = "/api/v1/inventory/change",
    tag = "inventory",
    params(InventoryChangesQuery),
    responses((status = 200, body = [InventoryChange]))
)]
pub async fn list_inventory_changes(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<InventoryChangesQuery>,
) -> AppResult<Json<Vec<InventoryChange>>> {
    let service = InventoryService::new(state.db);
    let changes = service.list_changes(query.inventory_id).await?;
    Ok(Json(changes))
}
