use chrono_tz::Tz;

use super::ServerError;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | HTTP_PORT | 3000 | HTTP listen port |
/// | ENVIRONMENT | development | development, staging or production |
/// | TIMEZONE | UTC | Business time zone (IANA name) for sales dates |
/// | REQUEST_TIMEOUT_MS | 30000 | Per-request timeout |
/// | SESSION_TTL_SECS | 86400 | Session lifetime |
/// | LOG_LEVEL | info | Default log filter when RUST_LOG is unset |
/// | LOG_JSON | false | JSON log lines on stdout |
/// | LOG_DIR | (unset) | Directory for daily rolling log files |
///
/// Backend connection settings are read by [`shop_client::ClientConfig::from_env`].
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP API port
    pub http_port: u16,
    /// Runtime environment
    pub environment: String,
    /// Business time zone used to bucket sales by calendar date
    pub timezone: Tz,
    /// Request timeout (milliseconds)
    pub request_timeout_ms: u64,
    /// Session lifetime (seconds)
    pub session_ttl_secs: u64,
    pub log_level: String,
    pub log_json: bool,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset variables use defaults; an unknown `TIMEZONE` is an error.
    pub fn from_env() -> Result<Self, ServerError> {
        let defaults = Self::default();

        let timezone = match std::env::var("TIMEZONE") {
            Ok(name) if !name.trim().is_empty() => parse_timezone(&name)?,
            _ => defaults.timezone,
        };

        Ok(Self {
            http_port: env_parse("HTTP_PORT").unwrap_or(defaults.http_port),
            environment: std::env::var("ENVIRONMENT").unwrap_or(defaults.environment),
            timezone,
            request_timeout_ms: env_parse("REQUEST_TIMEOUT_MS")
                .unwrap_or(defaults.request_timeout_ms),
            session_ttl_secs: env_parse("SESSION_TTL_SECS").unwrap_or(defaults.session_ttl_secs),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
            log_json: env_parse("LOG_JSON").unwrap_or(defaults.log_json),
            log_dir: std::env::var("LOG_DIR").ok().filter(|d| !d.trim().is_empty()),
        })
    }

    /// Override the listen port, used by tests
    pub fn with_port(mut self, http_port: u16) -> Self {
        self.http_port = http_port;
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            http_port: 3000,
            environment: "development".into(),
            timezone: Tz::UTC,
            request_timeout_ms: 30000,
            session_ttl_secs: 86400,
            log_level: "info".into(),
            log_json: false,
            log_dir: None,
        }
    }
}

/// Parse an IANA time zone name such as `Asia/Taipei`
pub fn parse_timezone(name: &str) -> Result<Tz, ServerError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| ServerError::Config(format!("Unknown TIMEZONE: {}", name)))
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok())
}
