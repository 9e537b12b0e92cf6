//! API routes
//!
//! - [`health`] - liveness
//! - [`auth`] - sign-up, login, logout, current user
//! - [`menu`] - menu listing and admin additions
//! - [`orders`] - checkout
//! - [`statistics`] - admin sales analytics

pub mod auth;
pub mod health;
pub mod menu;
pub mod orders;
pub mod statistics;

use std::time::Duration;

use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

/// Build the Axum router (without state)
pub fn build_app() -> Router<ServerState> {
    Router::<ServerState>::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(menu::router())
        .merge(orders::router())
        .merge(statistics::router())
}

/// Full application with session middleware, state and tower layers
pub fn build_router(state: ServerState) -> Router {
    let timeout = Duration::from_millis(state.config.request_timeout_ms);

    build_app()
        // require_auth skips public routes itself
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state)
        .layer(TimeoutLayer::new(timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
