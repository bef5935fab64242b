//! # Upstream Gateway Trait
//!
//! The seam between the HTTP handlers and the bank gateway client.
//! Handlers depend on `UpstreamGateway` via dynamic dispatch, which lets
//! tests substitute a stub gateway without any network in the loop.
//!
//! Every operation returns an [`UpstreamResponse`] whenever the bank
//! responded at all — including 4xx/5xx — because the relay's contract is
//! to forward upstream status and body verbatim. Only transport-level
//! failures surface as `RelayError::UpstreamUnavailable`.

use crate::error::RelayResult;
use async_trait::async_trait;
use std::sync::Arc;

/// Default sending-bank code used by slip verification when the caller
/// does not supply one.
pub const DEFAULT_SENDING_BANK: &str = "014";

/// Fixed reference string sent on every B-scan-C confirm call.
pub const CONFIRM_REFERENCE: &str = "BSCANC";

/// Header carrying the per-call correlation id on outbound requests.
pub const CORRELATION_HEADER: &str = "requestUId";

/// A response received from the bank gateway, forwarded as-is.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// HTTP status code as the bank returned it
    pub status: u16,
    /// Raw response body, untouched
    pub body: String,
}

impl UpstreamResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// True when the bank answered with a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// QR creation parameters as accepted from the merchant client.
///
/// Neither field is validated at this layer; the bank gateway owns
/// format checks for both.
#[derive(Debug, Clone)]
pub struct QrCreateRequest {
    /// Payment amount, forwarded exactly as received (string or number)
    pub amount: serde_json::Value,
    /// Reference 3 (merchant free-text reference)
    pub ref3: String,
}

/// Confirm-payment (B-scan-C) parameters from the merchant client.
#[derive(Debug, Clone)]
pub struct ConfirmPaymentRequest {
    /// QR payload scanned from the customer
    pub qr_data: String,
    /// Amount to confirm, forwarded exactly as received
    pub transaction_amount: serde_json::Value,
}

/// Core trait for the bank gateway client.
///
/// `authorization` is the caller's `authorization` header, forwarded
/// untouched when present; this layer performs no auth of its own.
#[async_trait]
pub trait UpstreamGateway: Send + Sync {
    /// Create a Thai QR (C-scan-B) for the given amount and reference.
    async fn create_qr(
        &self,
        request: &QrCreateRequest,
        authorization: Option<&str>,
    ) -> RelayResult<UpstreamResponse>;

    /// Look up a transaction by reference (slip verification).
    async fn verify_slip(
        &self,
        trans_ref: &str,
        sending_bank: &str,
        authorization: Option<&str>,
    ) -> RelayResult<UpstreamResponse>;

    /// Confirm a B-scan-C payment with a pre-derived partner
    /// transaction id.
    async fn confirm_payment(
        &self,
        request: &ConfirmPaymentRequest,
        partner_transaction_id: &str,
        authorization: Option<&str>,
    ) -> RelayResult<UpstreamResponse>;

    /// Biller id this gateway client was configured with.
    fn biller_id(&self) -> &str;
}

/// Type alias for a shared gateway (dynamic dispatch)
pub type SharedGateway = Arc<dyn UpstreamGateway>;
