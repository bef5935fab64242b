//! # Application State
//!
//! Shared state for the Axum application.
//! Holds the bank gateway client, the callback broadcast topic, and
//! server configuration.

use relay_core::{CallbackTopic, SharedGateway};
use relay_gateway::{GatewayClient, GatewayConfig};
use std::sync::Arc;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,
    /// Environment (development, staging, production)
    pub environment: String,
}

impl AppConfig {
    /// Load from environment variables
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            host: std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Bank gateway client
    pub gateway: SharedGateway,
    /// Broadcast topic for bank payment callbacks
    pub topic: CallbackTopic,
    /// Sending-bank code used when slip verification omits one
    pub default_sending_bank: String,
    /// Application config
    pub config: AppConfig,
}

impl AppState {
    /// Create a new AppState with the env-configured gateway client
    pub fn new() -> anyhow::Result<Self> {
        let config = AppConfig::from_env();

        let gateway_config = GatewayConfig::from_env()
            .map_err(|e| anyhow::anyhow!("Failed to configure bank gateway: {}", e))?;
        let default_sending_bank = gateway_config.default_sending_bank.clone();
        let gateway: SharedGateway = Arc::new(GatewayClient::new(gateway_config)?);

        Ok(Self {
            gateway,
            topic: CallbackTopic::new(),
            default_sending_bank,
            config,
        })
    }

    /// Create state around an explicit gateway (for tests)
    pub fn with_gateway(gateway: SharedGateway) -> Self {
        Self {
            gateway,
            topic: CallbackTopic::new(),
            default_sending_bank: relay_core::DEFAULT_SENDING_BANK.to_string(),
            config: AppConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                environment: "test".to_string(),
            },
        }
    }
}
