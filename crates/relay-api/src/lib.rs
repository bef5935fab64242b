//! # relay-api
//!
//! HTTP API layer for thaiqr-relay.
//!
//! This crate provides:
//! - Axum-based HTTP server
//! - Relay endpoints forwarding to the bank payment gateway
//! - Callback intake with real-time WebSocket fan-out
//!
//! ## Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | GET | `/health` | Health check |
//! | POST | `/qrcode/create` | Create Thai QR (C-scan-B) |
//! | GET | `/billpayment/transactions/{transRef}` | Slip verification |
//! | POST | `/bscanc/confirm` | Confirm payment (B-scan-C) |
//! | POST | `/payment-callback` | Bank callback intake |
//! | GET | `/ws/payments` | WebSocket callback subscription |

pub mod handlers;
pub mod routes;
pub mod state;
pub mod ws;

pub use routes::create_router;
pub use state::{AppConfig, AppState};
