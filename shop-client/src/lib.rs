//! Shop Client - HTTP client for the hosted backend
//!
//! Provides the backend calls the shop needs (sales, menu, profiles, auth)
//! and decodes loosely typed rows into `shared` models.

pub mod backend;
pub mod config;
pub mod error;
pub mod http;

pub use backend::{AuthSession, BackendUser, ShopBackend};
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
