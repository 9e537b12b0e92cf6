//! Authentication Handlers
//!
//! Credentials are checked by the backend; this server only keeps the
//! resulting session.

use axum::{Json, extract::State};
use shared::client::{LoginRequest, LoginResponse, SignupRequest, UserInfo};
use shared::models::Role;
use shop_client::ClientError;

use crate::auth::{CurrentUser, Session};
use crate::core::ServerState;
use crate::security_log;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode};

fn require_credentials(email: &str, password: &str) -> AppResult<()> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::with_message(
            ErrorCode::RequiredField,
            "Email and password are required",
        ));
    }
    Ok(())
}

/// Sign-up handler
///
/// Creates the backend account and its profile row. New accounts are
/// always plain users; admins are promoted in the backend.
pub async fn signup(
    State(state): State<ServerState>,
    Json(req): Json<SignupRequest>,
) -> AppResult<Json<ApiResponse<UserInfo>>> {
    require_credentials(&req.email, &req.password)?;
    let email = req.email.trim();

    let user = state
        .backend()
        .sign_up(email, &req.password)
        .await
        .map_err(|e| {
            tracing::warn!(email = %email, error = %e, "Sign-up rejected");
            AppError::from(e)
        })?;

    state
        .backend()
        .create_profile(&user.id, Role::User, None)
        .await
        .map_err(|e| {
            tracing::error!(user_id = %user.id, error = %e, "Failed to assign role to new user");
            AppError::from(e)
        })?;

    security_log!("INFO", "signup", user_id = user.id.clone());

    Ok(Json(ApiResponse::success(UserInfo {
        email: user.email.unwrap_or_else(|| email.to_string()),
        id: user.id,
        role: Role::User,
    })))
}

/// Login handler
///
/// Signs in against the backend, looks up the profile role and opens a
/// session. A failed role lookup signs the user in as a plain user.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<ApiResponse<LoginResponse>>> {
    require_credentials(&req.email, &req.password)?;
    let email = req.email.trim();

    let auth = match state.backend().sign_in(email, &req.password).await {
        Ok(auth) => auth,
        Err(e) => {
            security_log!(
                "WARN",
                "login_failed",
                email = email.to_string(),
                error = e.to_string()
            );
            return Err(login_error(e));
        }
    };

    let role = match state
        .backend()
        .fetch_role(&auth.user.id, Some(&auth.access_token))
        .await
    {
        Ok(Some(role)) => role,
        Ok(None) => {
            tracing::warn!(user_id = %auth.user.id, "No profile row, defaulting to user role");
            Role::User
        }
        Err(e) => {
            tracing::warn!(user_id = %auth.user.id, error = %e, "Role lookup failed, defaulting to user role");
            Role::User
        }
    };

    let user = CurrentUser {
        id: auth.user.id,
        email: auth.user.email.unwrap_or_else(|| email.to_string()),
        role,
    };
    let session = state.sessions.create(user, auth.access_token);

    security_log!(
        "INFO",
        "login",
        user_id = session.user.id.clone(),
        role = session.user.role.as_str()
    );

    Ok(Json(ApiResponse::success(LoginResponse {
        user: UserInfo::from(&session.user),
        token: session.token,
    })))
}

/// Map a backend sign-in failure to the user-facing error
fn login_error(err: ClientError) -> AppError {
    match err {
        ClientError::Validation(msg) | ClientError::Forbidden(msg)
            if msg.to_lowercase().contains("not confirmed") =>
        {
            AppError::new(ErrorCode::EmailNotConfirmed)
        }
        ClientError::Validation(_) | ClientError::Unauthorized => AppError::invalid_credentials(),
        other => other.into(),
    }
}

/// Current user info
pub async fn me(user: CurrentUser) -> Json<ApiResponse<UserInfo>> {
    Json(ApiResponse::success(UserInfo::from(&user)))
}

/// Logout handler
///
/// The local session is always dropped; a failed backend sign-out is only
/// logged.
pub async fn logout(
    State(state): State<ServerState>,
    session: Session,
) -> Json<ApiResponse<()>> {
    state.sessions.remove(&session.token);

    if let Err(e) = state.backend().sign_out(&session.access_token).await {
        tracing::warn!(user_id = %session.user.id, error = %e, "Backend sign-out failed");
    }

    security_log!("INFO", "logout", user_id = session.user.id.clone());
    Json(ApiResponse::ok())
}
