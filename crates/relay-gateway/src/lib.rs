//! # relay-gateway
//!
//! Bank payment gateway client for thaiqr-relay.
//!
//! This crate provides:
//! - `GatewayConfig` loaded from environment variables
//! - `GatewayClient`, the reqwest-backed `UpstreamGateway` implementation
//!
//! ## Environment Variables
//!
//! | Variable | Required | Default |
//! |----------|----------|---------|
//! | `GATEWAY_BASE_URL` | yes | - |
//! | `BILLER_ID` | yes | - |
//! | `UPSTREAM_TIMEOUT_SECS` | no | 30 |
//! | `DEFAULT_SENDING_BANK` | no | "014" |

pub mod client;
pub mod config;

pub use client::GatewayClient;
pub use config::GatewayConfig;
