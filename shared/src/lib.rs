//! Shared types for the beverage shop services
//!
//! Common types used across shop-server and shop-client: the error system,
//! menu/sale models, the backend row adapter, money helpers and report views.

pub mod client;
pub mod error;
pub mod models;
pub mod money;
pub mod report;
pub mod rows;

// Re-exports
pub use axum::Json;
pub use http;
pub use serde::{Deserialize, Serialize};

pub use error::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};
