//! Route definitions for the inventory and sales API

use axum::{
    routing::get,
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health
        .route("/health", get(handlers::health_check))
        .route("/ping", get(handlers::ping))
        // Catalog
        .nest("/category", category_routes())
        .nest("/product", product_routes())
        // Stock levels and change log
        .nest("/inventory", inventory_routes())
        // Sales and revenue reporting
        .nest("/sales", sales_routes())
}

fn category_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::list_categories).post(handlers::create_category),
    )
}

fn product_routes() -> Router<AppState> {
    Router::new().route(
        "/",
        get(handlers::list_products).post(handlers::create_product),
    )
}

fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::list_inventory)
                .post(handlers::create_inventory)
                .put(handlers::adjust_stock),
        )
        .route("/change", get(handlers::list_inventory_changes))
}

fn sales_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::list_sales).post(handlers::create_sales))
        .route("/all", get(handlers::list_all_sales))
        .route("/revenue", get(handlers::calculate_revenue))
        .route("/compare-revenue", get(handlers::compare_revenue))
}
