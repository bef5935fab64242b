//! # Request Handlers
//!
//! Axum request handlers for the payment relay. Three of the four
//! operations are straight passthroughs to the bank gateway; callback
//! intake answers the bank immediately and fans the body out to
//! subscribed clients afterwards.
//!
//! All upstream-facing handlers share one error split: if the bank
//! responded at all, its status and body are forwarded verbatim; if the
//! call failed at the transport level, the caller gets a 502 with a
//! generic JSON envelope.

use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use relay_core::{
    partner_transaction_id, CallbackEnvelope, ConfirmPaymentRequest, QrCreateRequest, RelayError,
    UpstreamResponse,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument};

// =============================================================================
// Request/Response Types
// =============================================================================

/// QR creation request from the merchant client
#[derive(Debug, Deserialize)]
pub struct CreateQrRequest {
    /// Payment amount (string or number, forwarded as received)
    pub amount: serde_json::Value,
    /// Merchant reference
    pub ref3: String,
}

/// Slip verification query parameters
#[derive(Debug, Deserialize)]
pub struct SlipVerifyQuery {
    /// Sending-bank code override; defaults to the configured code
    #[serde(default, rename = "sendingBank")]
    pub sending_bank: Option<String>,
}

/// Confirm-payment (B-scan-C) request from the merchant client
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    /// QR payload scanned from the customer
    pub qr_data: String,
    /// Amount to confirm (string or number, forwarded as received)
    pub transaction_amount: serde_json::Value,
}

/// Error response envelope
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: u16) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

/// Forward the bank's status and body byte-for-byte.
fn passthrough(upstream: UpstreamResponse) -> Response {
    let status = StatusCode::from_u16(upstream.status).unwrap_or(StatusCode::BAD_GATEWAY);
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        upstream.body,
    )
        .into_response()
}

fn relay_error_to_response(err: RelayError) -> Response {
    error!("Relay error: {}", err);
    let code = err.status_code();
    let response = ErrorResponse::new(err.to_string(), code);
    (
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        Json(response),
    )
        .into_response()
}

/// The caller's `authorization` header, forwarded untouched when present.
fn forwarded_authorization(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}

// =============================================================================
// Handlers
// =============================================================================

/// Health check endpoint
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "thaiqr-relay",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Create a Thai QR (C-scan-B)
#[instrument(skip(state, headers, request), fields(ref3 = %request.ref3))]
pub async fn create_qr(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateQrRequest>,
) -> Response {
    let upstream_request = QrCreateRequest {
        amount: request.amount,
        ref3: request.ref3,
    };

    match state
        .gateway
        .create_qr(&upstream_request, forwarded_authorization(&headers))
        .await
    {
        Ok(upstream) => passthrough(upstream),
        Err(e) => relay_error_to_response(e),
    }
}

/// Intake for bank payment-completion callbacks.
///
/// The bank enforces a short confirmation timeout on its callback URL, so
/// the inbound exchange is closed with an empty 200 before any fan-out
/// work runs. The publish happens on a detached task; delivery is not
/// acknowledged to the bank and failures are never reported back.
#[instrument(skip(state, envelope))]
pub async fn payment_callback(
    State(state): State<AppState>,
    Json(envelope): Json<CallbackEnvelope>,
) -> StatusCode {
    tokio::spawn(async move {
        let delivered = state.topic.publish(envelope);
        debug!("Callback fanned out to {} subscribers", delivered);
    });

    StatusCode::OK
}

/// Slip verification: transaction lookup by reference
#[instrument(skip(state, headers, query), fields(trans_ref = %trans_ref))]
pub async fn verify_slip(
    State(state): State<AppState>,
    Path(trans_ref): Path<String>,
    Query(query): Query<SlipVerifyQuery>,
    headers: HeaderMap,
) -> Response {
    let sending_bank = query
        .sending_bank
        .unwrap_or_else(|| state.default_sending_bank.clone());

    match state
        .gateway
        .verify_slip(&trans_ref, &sending_bank, forwarded_authorization(&headers))
        .await
    {
        Ok(upstream) => passthrough(upstream),
        Err(e) => relay_error_to_response(e),
    }
}

/// Confirm a B-scan-C payment
#[instrument(skip(state, headers, request))]
pub async fn confirm_payment(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<ConfirmRequest>,
) -> Response {
    let partner_txn_id = partner_transaction_id(state.gateway.biller_id(), Utc::now());
    info!("Confirming payment: partner_txn={}", partner_txn_id);

    let upstream_request = ConfirmPaymentRequest {
        qr_data: request.qr_data,
        transaction_amount: request.transaction_amount,
    };

    match state
        .gateway
        .confirm_payment(
            &upstream_request,
            &partner_txn_id,
            forwarded_authorization(&headers),
        )
        .await
    {
        Ok(upstream) => passthrough(upstream),
        Err(e) => relay_error_to_response(e),
    }
}
