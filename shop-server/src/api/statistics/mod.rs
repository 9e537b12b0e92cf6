//! Statistics API (sales analytics, admin only)

mod handler;

use axum::{Router, middleware, routing::get};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/statistics", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::get_statistics))
        .route("/sales-trend", get(handler::get_sales_trend))
        .route("/drink-distribution", get(handler::get_drink_distribution))
        .route("/drink-revenue", get(handler::get_drink_revenue))
        .layer(middleware::from_fn(require_admin))
}
