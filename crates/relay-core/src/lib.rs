//! # relay-core
//!
//! Core types and traits for the thaiqr-relay payment relay.
//!
//! This crate provides:
//! - `UpstreamGateway` trait for the bank gateway client
//! - `UpstreamResponse` and the relay's passthrough request types
//! - `CallbackTopic` for real-time fan-out of bank payment callbacks
//! - `partner_transaction_id` derivation for B-scan-C confirms
//! - `RelayError` for typed error handling
//!
//! ## Example
//!
//! ```rust,ignore
//! use relay_core::{CallbackTopic, QrCreateRequest, SharedGateway};
//!
//! // Forward a QR creation to the bank, verbatim passthrough back
//! let upstream = gateway.create_qr(&request, auth_header).await?;
//!
//! // Fan a bank callback out to every connected client
//! let topic = CallbackTopic::new();
//! let mut rx = topic.subscribe();
//! topic.publish(envelope);
//! ```

pub mod error;
pub mod gateway;
pub mod topic;
pub mod txn_id;

// Re-exports for convenience
pub use error::{RelayError, RelayResult};
pub use gateway::{
    ConfirmPaymentRequest, QrCreateRequest, SharedGateway, UpstreamGateway, UpstreamResponse,
    CONFIRM_REFERENCE, CORRELATION_HEADER, DEFAULT_SENDING_BANK,
};
pub use topic::{CallbackEnvelope, CallbackTopic};
pub use txn_id::{partner_transaction_id, TXN_ID_SUFFIX};
