//! Authentication middleware

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::AppError;
use crate::auth::{CurrentUser, resolve_session};
use crate::core::ServerState;
use crate::security_log;

/// Routes reachable without a session
const PUBLIC_API_ROUTES: &[&str] = &["/api/auth/login", "/api/auth/signup"];

/// Authentication middleware - requires a signed-in session
///
/// Resolves `Authorization: Bearer <token>` against the session store and
/// injects both [`crate::auth::Session`] and [`CurrentUser`] into the request extensions.
///
/// # Skipped
///
/// - `OPTIONS *` (CORS preflight)
/// - non `/api/` paths
/// - `/api/auth/login`, `/api/auth/signup`
///
/// # Errors
///
/// | Error | HTTP status |
/// |-------|-------------|
/// | No Authorization header | 401 NotAuthenticated |
/// | Unknown token | 401 TokenInvalid |
/// | Expired session | 401 SessionExpired |
pub async fn require_auth(
    State(state): State<ServerState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == http::Method::OPTIONS {
        return Ok(next.run(req).await);
    }

    if !path.starts_with("/api/") || PUBLIC_API_ROUTES.contains(&path) {
        return Ok(next.run(req).await);
    }

    let session = resolve_session(&state, req.headers(), req.uri())?;
    req.extensions_mut().insert(session.user.clone());
    req.extensions_mut().insert(session);
    Ok(next.run(req).await)
}

/// Admin middleware - requires `role == admin`
///
/// Must run after [`require_auth`]. Non-admins get 403 AdminRequired.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::unauthorized())?;

    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id.clone(),
            email = user.email.clone(),
            user_role = user.role.as_str()
        );
        return Err(AppError::new(shared::ErrorCode::AdminRequired));
    }

    Ok(next.run(req).await)
}
