//! Session Extractors
//!
//! Handlers take [`Session`] or [`CurrentUser`] as arguments. Both reuse
//! the values injected by the middleware and fall back to resolving the
//! bearer token themselves.

use axum::{extract::FromRequestParts, http::request::Parts};
use http::{HeaderMap, Uri};
use shared::ErrorCode;

use crate::AppError;
use crate::auth::session::SessionError;
use crate::auth::{CurrentUser, Session};
use crate::core::ServerState;
use crate::security_log;

/// Extract the token from an `Authorization: Bearer <token>` value
pub fn bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Look up the session named by the request's bearer token
pub fn resolve_session(
    state: &ServerState,
    headers: &HeaderMap,
    uri: &Uri,
) -> Result<Session, AppError> {
    let auth_header = headers
        .get(http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    let token = match auth_header {
        Some(header) => bearer_token(header)
            .ok_or_else(|| AppError::invalid_token("Invalid authorization header"))?,
        None => {
            security_log!("WARN", "auth_missing", uri = format!("{:?}", uri));
            return Err(AppError::unauthorized());
        }
    };

    state.sessions.get(token).map_err(|e| {
        security_log!(
            "WARN",
            "auth_failed",
            error = format!("{:?}", e),
            uri = format!("{:?}", uri)
        );
        match e {
            SessionError::Expired => AppError::new(ErrorCode::SessionExpired),
            SessionError::Unknown => AppError::invalid_token("Unknown session"),
        }
    })
}

impl FromRequestParts<ServerState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(session) = parts.extensions.get::<Session>() {
            return Ok(session.clone());
        }

        let session = resolve_session(state, &parts.headers, &parts.uri)?;
        parts.extensions.insert(session.user.clone());
        parts.extensions.insert(session.clone());
        Ok(session)
    }
}

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }
        Session::from_request_parts(parts, state)
            .await
            .map(|s| s.user)
    }
}
