//! Checkout Handler

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::{CheckoutRequest, SaleRecord};

use crate::auth::Session;
use crate::core::ServerState;
use crate::orders::{CartLine, price_checkout};
use crate::utils::time::now_sale_timestamp;
use crate::utils::{ApiResponse, AppResult};

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub sale: SaleRecord,
    pub lines: Vec<CartLine>,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// POST /api/orders/checkout
///
/// Prices the requested lines against the current menu and appends the sale.
pub async fn checkout(
    State(state): State<ServerState>,
    session: Session,
    Json(req): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<CheckoutResponse>>> {
    let menu = state.backend().fetch_menu(session.access_token()).await?;
    let cart = price_checkout(&req, &menu.items)?;

    let sale = cart.to_sale(now_sale_timestamp());
    let stored = state
        .backend()
        .insert_sale(&sale, session.access_token())
        .await?;

    tracing::info!(
        user_id = %session.user.id,
        total = %sale.total_price,
        items = sale.total_quantity(),
        "Order placed"
    );

    Ok(Json(ApiResponse::success_with_message(
        "Order placed successfully!",
        CheckoutResponse {
            total: cart.total(),
            lines: cart.lines().to_vec(),
            sale: stored,
        },
    )))
}
