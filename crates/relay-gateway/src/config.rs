//! # Gateway Configuration
//!
//! Configuration for the bank gateway client. Loaded once from the
//! environment and injected at construction; nothing here is global or
//! mutable after startup.

use relay_core::{RelayError, DEFAULT_SENDING_BANK};
use std::env;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Bank gateway API configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Gateway base URL, no trailing slash (e.g. "https://api.bank.example")
    pub base_url: String,

    /// Merchant biller id registered with the bank
    pub biller_id: String,

    /// Request timeout for outbound calls
    pub timeout: Duration,

    /// Sending-bank code used when slip verification omits one
    pub default_sending_bank: String,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    ///
    /// Required env vars:
    /// - `GATEWAY_BASE_URL`
    /// - `BILLER_ID`
    ///
    /// Optional:
    /// - `UPSTREAM_TIMEOUT_SECS` (default 30)
    /// - `DEFAULT_SENDING_BANK` (default "014")
    pub fn from_env() -> Result<Self, RelayError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let base_url = env::var("GATEWAY_BASE_URL")
            .map_err(|_| RelayError::Configuration("GATEWAY_BASE_URL not set".to_string()))?;

        let biller_id = env::var("BILLER_ID")
            .map_err(|_| RelayError::Configuration("BILLER_ID not set".to_string()))?;

        let timeout_secs = match env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(raw) => raw.parse::<u64>().map_err(|_| {
                RelayError::Configuration(format!(
                    "UPSTREAM_TIMEOUT_SECS must be an integer, got {raw:?}"
                ))
            })?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let default_sending_bank = env::var("DEFAULT_SENDING_BANK")
            .unwrap_or_else(|_| DEFAULT_SENDING_BANK.to_string());

        Self::new(base_url, biller_id)
            .with_timeout(Duration::from_secs(timeout_secs))
            .with_default_sending_bank(default_sending_bank)
            .validated()
    }

    /// Create config with explicit values (for testing)
    pub fn new(base_url: impl Into<String>, biller_id: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }

        Self {
            base_url,
            biller_id: biller_id.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            default_sending_bank: DEFAULT_SENDING_BANK.to_string(),
        }
    }

    /// Builder: set the outbound request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builder: set the fallback sending-bank code
    pub fn with_default_sending_bank(mut self, code: impl Into<String>) -> Self {
        self.default_sending_bank = code.into();
        self
    }

    fn validated(self) -> Result<Self, RelayError> {
        if self.base_url.is_empty() {
            return Err(RelayError::Configuration(
                "GATEWAY_BASE_URL must not be empty".to_string(),
            ));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(RelayError::Configuration(format!(
                "GATEWAY_BASE_URL must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.biller_id.is_empty() {
            return Err(RelayError::Configuration(
                "BILLER_ID must not be empty".to_string(),
            ));
        }
        Ok(self)
    }
}
