//! HTTP handlers for sales and revenue reporting

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use shared::{inclusive_day_range, window_for, PageRequest, PeriodParams, RevenuePeriod};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::error::{AppError, AppResult, ErrorResponse};
use crate::extract::{AppJson, AppQuery};
use crate::services::sales::{Revenue, RevenueComparison, Sale, SaleLineInput, SalesService};
use crate::AppState;

/// Record a batch of sales
#[utoipa::path(
    post,
    path = "/api/v1/sales",
    tag = "sales",
    request_body = [SaleLineInput],
    responses(
        (status = 201, body = [Sale]),
        (status = 404, description = "Insufficient inventory", body = ErrorResponse)
    )
)]
pub async fn create_sales(
    State(state): State<AppState>,
    AppJson(lines): AppJson<Vec<SaleLineInput>>,
) -> AppResult<(StatusCode, Json<Vec<Sale>>)> {
    let service = SalesService::new(state.db);
    let sales = service.record_sales(lines).await?;
    Ok((StatusCode::CREATED, Json(sales)))
}

/// Query parameters for listing sales in a date range
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListSalesQuery {
    /// `YYYY-MM-DD`, from 00:00:00
    pub start_date: String,
    /// `YYYY-MM-DD`, through 23:59:59
    pub end_date: String,
    pub product_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
}

/// Sales between two dates, end date inclusive
#[utoipa::path(
    get,
    path = "/api/v1/sales",
    tag = "sales",
    params(ListSalesQuery),
    responses((status = 200, body = [Sale]), (status = 400, body = ErrorResponse))
)]
pub async fn list_sales(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListSalesQuery>,
) -> AppResult<Json<Vec<Sale>>> {
    let window = inclusive_day_range(&query.start_date, &query.end_date)?;

    let service = SalesService::new(state.db);
    let sales = service
        .list_sales(&window, query.product_id, query.category_id)
        .await?;
    Ok(Json(sales))
}

/// Paginated list of every sale
#[utoipa::path(
    get,
    path = "/api/v1/sales/all",
    tag = "sales",
    params(
        ("limit" = Option<i64>, Query, description = "Page size, 0 to 50"),
        ("offset" = Option<i64>, Query, description = "Rows to skip")
    ),
    responses((status = 200, body = [Sale]), (status = 400, body = ErrorResponse))
)]
pub async fn list_all_sales(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<PageRequest>,
) -> AppResult<Json<Vec<Sale>>> {
    let page = query
        .resolve()
        .map_err(|message| AppError::validation("limit/offset", message))?;

    let service = SalesService::new(state.db);
    let sales = service.list_all_sales(page).await?;
    Ok(Json(sales))
}

/// Query parameters for period revenue
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RevenueQuery {
    /// `daily`, `weekly`, `monthly` or `annual`
    #[param(value_type = String)]
    pub period: RevenuePeriod,
    pub date: Option<String>,
    pub week_start: Option<String>,
    /// `YYYY-MM`
    pub month: Option<String>,
    pub year: Option<i32>,
}

/// Revenue for a daily, weekly, monthly or annual period
#[utoipa::path(
    get,
    path = "/api/v1/sales/revenue",
    tag = "sales",
    params(RevenueQuery),
    responses(
        (status = 200, body = Revenue),
        (status = 400, body = ErrorResponse),
        (status = 422, description = "Period parameter missing", body = ErrorResponse)
    )
)]
pub async fn calculate_revenue(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<RevenueQuery>,
) -> AppResult<Json<Revenue>> {
    let params = PeriodParams {
        date: query.date,
        week_start: query.week_start,
        month: query.month,
        year: query.year,
    };
    let window = window_for(query.period, &params)?;

    let service = SalesService::new(state.db);
    let revenue = service.compute_revenue(&window).await?;
    Ok(Json(revenue))
}

/// Query parameters for comparing category revenue
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompareRevenueQuery {
    pub start_date: String,
    pub end_date: String,
}

/// Revenue per category between two dates, end date inclusive
#[utoipa::path(
    get,
    path = "/api/v1/sales/compare-revenue",
    tag = "sales",
    params(CompareRevenueQuery),
    responses((status = 200, body = RevenueComparison), (status = 400, body = ErrorResponse))
)]
pub async fn compare_revenue(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<CompareRevenueQuery>,
) -> AppResult<Json<RevenueComparison>> {
    let window = inclusive_day_range(&query.start_date, &query.end_date)?;

    let service = SalesService::new(state.db);
    let comparison = service.compare_revenue(&window).await?;
    Ok(Json(comparison))
}
