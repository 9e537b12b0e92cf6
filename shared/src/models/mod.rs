//! Data models
//!
//! Shared between shop-server, shop-client and the frontend (via API).
//! Wire shapes of the hosted backend live in [`crate::rows`].

pub mod menu;
pub mod role;
pub mod sale;

// Re-exports
pub use menu::*;
pub use role::*;
pub use sale::*;
