//! Client configuration

use crate::{ClientError, ClientResult};

/// Connection settings for the hosted backend
///
/// # Environment variables
///
/// | Variable | Default | Description |
/// |----------|---------|-------------|
/// | BACKEND_URL | (required) | Project URL, e.g. `https://xyz.example.co` |
/// | BACKEND_ANON_KEY | (required) | Public anon API key |
/// | BACKEND_TIMEOUT_SECS | 30 | Request timeout in seconds |
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend base URL (REST under `/rest/v1`, auth under `/auth/v1`)
    pub base_url: String,

    /// Anon key sent as `apikey` and as fallback bearer token
    pub anon_key: String,

    /// Request timeout in seconds
    pub timeout: u64,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            anon_key: anon_key.into(),
            timeout: 30,
        }
    }

    /// Load configuration from the environment.
    ///
    /// Fails when the URL or anon key is missing or blank.
    pub fn from_env() -> ClientResult<Self> {
        let base_url = required_env("BACKEND_URL")?;
        let anon_key = required_env("BACKEND_ANON_KEY")?;
        let timeout = std::env::var("BACKEND_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(30);

        Ok(Self::new(base_url, anon_key).with_timeout(timeout))
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> ClientResult<super::HttpClient> {
        super::HttpClient::new(self)
    }
}

fn required_env(name: &str) -> ClientResult<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v.trim().to_string()),
        _ => Err(ClientError::Config(format!("Missing {}", name))),
    }
}
