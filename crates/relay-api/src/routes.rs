//! # Routes
//!
//! Axum router configuration for the payment relay.

use crate::handlers;
use crate::state::AppState;
use crate::ws;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - Relay:
///   - POST /qrcode/create - Thai QR creation (C-scan-B)
///   - GET  /billpayment/transactions/{transRef} - Slip verification
///   - POST /bscanc/confirm - Confirm payment (B-scan-C)
///
/// - Callbacks:
///   - POST /payment-callback - Bank callback intake, fans out to subscribers
///   - GET  /ws/payments - WebSocket subscription to callback envelopes
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - the relay sits behind the merchant's own edge,
    // so allow all origins here
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health check at root
        .route("/health", get(handlers::health))
        .route("/", get(handlers::health))
        // Relay operations
        .route("/qrcode/create", post(handlers::create_qr))
        .route(
            "/billpayment/transactions/{trans_ref}",
            get(handlers::verify_slip),
        )
        .route("/bscanc/confirm", post(handlers::confirm_payment))
        // Bank callback intake and real-time fan-out
        .route("/payment-callback", post(handlers::payment_callback))
        .route("/ws/payments", get(ws::payments_ws))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        // State
        .with_state(state)
}
