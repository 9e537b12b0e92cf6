//! Authentication and authorization
//!
//! - [`SessionStore`] - server-side sessions keyed by opaque token
//! - [`CurrentUser`] - signed-in user context
//! - [`require_auth`] - session middleware
//! - [`require_admin`] - admin role middleware

pub mod extractor;
pub mod middleware;
pub mod session;

pub use extractor::{bearer_token, resolve_session};
pub use middleware::{require_admin, require_auth};
pub use session::{CurrentUser, Session, SessionStore};
