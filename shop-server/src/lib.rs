//! Shop Server - beverage shop ordering and sales analytics service
//!
//! # Architecture
//!
//! Persistence and authentication live in a hosted backend reached through
//! [`shop_client`]. This crate adds server-side sessions, menu and checkout
//! endpoints, and the sales aggregation engine behind the admin statistics.
//!
//! # Modules
//!
//! ```text
//! shop-server/src/
//! ├── core/          # config, state, server, startup errors
//! ├── auth/          # session store, middleware, extractors
//! ├── api/           # HTTP routes and handlers
//! ├── orders/        # cart and checkout pricing
//! ├── reports/       # aggregation engine (pure)
//! └── utils/         # logger, timestamp parsing
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod orders;
pub mod reports;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, Session, SessionStore};
pub use core::{Config, Server, ServerError, ServerState};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load `.env`, read configuration and install the logger
pub fn setup_environment() -> Result<Config, ServerError> {
    let _ = dotenv::dotenv();
    let config = Config::from_env()?;
    init_logger_with_file(
        Some(&config.log_level),
        config.log_json,
        config.log_dir.as_deref(),
    );
    Ok(config)
}

pub fn print_banner() {
    println!(
        r#"
   _____ __
  / ___// /_  ____  ____
  \__ \/ __ \/ __ \/ __ \
 ___/ / / / / /_/ / /_/ /
/____/_/ /_/\____/ .___/
                /_/
    "#
    );
}
