//! Menu Handlers

use axum::{Json, extract::State};
use shared::models::{MenuItem, MenuItemCreate};
use shop_client::ClientError;

use crate::auth::Session;
use crate::core::ServerState;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

/// GET /api/menu - all drinks in backend order
pub async fn list(
    State(state): State<ServerState>,
    session: Session,
) -> AppResult<Json<ApiResponse<Vec<MenuItem>>>> {
    let decoded = state.backend().fetch_menu(session.access_token()).await?;
    if !decoded.rejected.is_empty() {
        tracing::warn!(
            rejected = decoded.rejected.len(),
            "Menu listing left out malformed rows"
        );
    }
    Ok(Json(ApiResponse::success(decoded.items)))
}

/// POST /api/menu - add a drink (admin)
pub async fn create(
    State(state): State<ServerState>,
    session: Session,
    Json(form): Json<MenuItemCreate>,
) -> AppResult<Json<ApiResponse<MenuItem>>> {
    let item = form.validate()?;

    let stored = state
        .backend()
        .insert_menu_item(&item, session.access_token())
        .await
        .map_err(|e| match e {
            ClientError::Conflict(msg) => {
                AppError::with_message(ErrorCode::DrinkNameExists, msg)
                    .with_detail("name", item.name.clone())
            }
            other => {
                tracing::warn!(drink = %item.name, error = %other, "Failed to add drink");
                AppError::from(other)
            }
        })?;

    tracing::info!(
        drink = %stored.name,
        price = %stored.unit_price,
        user_id = %session.user.id,
        "Drink added to menu"
    );

    Ok(Json(ApiResponse::success_with_message(
        format!("Drink \"{}\" added successfully!", stored.name),
        stored,
    )))
}
