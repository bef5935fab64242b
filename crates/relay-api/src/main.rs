//! # Thai-QR Relay
//!
//! Thin HTTP relay between merchant clients and the bank payment gateway,
//! with real-time fan-out of payment callbacks.
//!
//! ## Usage
//!
//! ```bash
//! # Set environment variables
//! export GATEWAY_BASE_URL=https://api-sandbox.bank.example
//! export BILLER_ID=311040039475231
//!
//! # Run the server
//! thaiqr-relay
//! ```

use relay_api::{routes, state::AppState};
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Print banner
    print_banner();

    // Initialize application state
    let state = AppState::new()?;

    let addr = state.config.socket_addr();
    let is_prod = state.config.is_production();

    info!("Environment: {}", state.config.environment);
    info!("Biller id: {}", state.gateway.biller_id());
    info!("Default sending bank: {}", state.default_sending_bank);

    // Create router
    let app = routes::create_router(state);

    // Start server
    info!("🚀 Thai-QR relay starting on http://{}", addr);

    if !is_prod {
        info!("📝 Health: http://{}/health", addr);
        info!("💳 QR create: POST http://{}/qrcode/create", addr);
        info!("🔔 Callback intake: POST http://{}/payment-callback", addr);
        info!("📡 Subscriptions: ws://{}/ws/payments", addr);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner() {
    println!(
        r#"
  ⚡ Thai-QR Relay ⚡
  ━━━━━━━━━━━━━━━━━━━
  Bank gateway relay + callback fan-out
  Version: {}

"#,
        env!("CARGO_PKG_VERSION")
    );
}
