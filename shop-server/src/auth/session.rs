//! Server-side sessions
//!
//! A session ties an opaque token handed to the browser to the signed-in
//! user and the backend access token used on their behalf.

use std::time::{Duration, Instant};

use dashmap::DashMap;
use shared::client::UserInfo;
use shared::models::Role;

/// Current user context, injected into requests by [`super::require_auth`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub role: Role,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&CurrentUser> for UserInfo {
    fn from(user: &CurrentUser) -> Self {
        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}

/// Signed-in session
#[derive(Debug, Clone)]
pub struct Session {
    /// Opaque bearer token issued by this server
    pub token: String,
    pub user: CurrentUser,
    /// Backend access token for calls made on the user's behalf
    pub access_token: String,
    created_at: Instant,
}

impl Session {
    pub fn access_token(&self) -> Option<&str> {
        Some(self.access_token.as_str())
    }
}

/// Lookup failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    Unknown,
    Expired,
}

/// Concurrent session store keyed by session token
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, Session>,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl,
        }
    }

    /// Open a session and return it with a fresh token
    pub fn create(&self, user: CurrentUser, access_token: impl Into<String>) -> Session {
        let session = Session {
            token: uuid::Uuid::new_v4().to_string(),
            user,
            access_token: access_token.into(),
            created_at: Instant::now(),
        };
        self.sessions.insert(session.token.clone(), session.clone());
        session
    }

    /// Resolve a token. Expired sessions are dropped on lookup.
    pub fn get(&self, token: &str) -> Result<Session, SessionError> {
        let session = self
            .sessions
            .get(token)
            .map(|s| s.clone())
            .ok_or(SessionError::Unknown)?;

        if session.created_at.elapsed() > self.ttl {
            self.sessions.remove(token);
            return Err(SessionError::Expired);
        }
        Ok(session)
    }

    pub fn remove(&self, token: &str) -> Option<Session> {
        self.sessions.remove(token).map(|(_, s)| s)
    }

    /// Drop every expired session, returning how many were removed
    pub fn purge_expired(&self) -> usize {
        let before = self.sessions.len();
        self.sessions
            .retain(|_, s| s.created_at.elapsed() <= self.ttl);
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
