//! # Bank Gateway Client
//!
//! The reqwest-backed implementation of `UpstreamGateway`. Each call
//! attaches a freshly generated correlation id and the caller's forwarded
//! `authorization` header, then returns whatever the bank answered —
//! status and body untouched — so handlers can forward it verbatim.
//!
//! Only transport-level failures (no upstream response at all) become
//! errors, mapped to `RelayError::UpstreamUnavailable`.

use crate::config::GatewayConfig;
use async_trait::async_trait;
use relay_core::{
    ConfirmPaymentRequest, QrCreateRequest, RelayError, RelayResult, UpstreamGateway,
    UpstreamResponse, CONFIRM_REFERENCE, CORRELATION_HEADER,
};
use reqwest::{Client, RequestBuilder};
use serde::Serialize;
use tracing::{debug, instrument, warn};
use uuid::Uuid;

const QR_CREATE_PATH: &str = "/partners/sandbox/v1/payment/qrcode/create";
const SLIP_VERIFY_PATH: &str = "/partners/sandbox/v1/payment/billpayment/transactions";
const CONFIRM_PATH: &str = "/partners/sandbox/v1/payment/merchant/rtp/confirm";

/// Bank gateway client
pub struct GatewayClient {
    config: GatewayConfig,
    client: Client,
}

impl GatewayClient {
    /// Create a new gateway client from config
    pub fn new(config: GatewayConfig) -> RelayResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| RelayError::Configuration(format!("HTTP client build failed: {e}")))?;

        Ok(Self { config, client })
    }

    /// Create from environment variables
    pub fn from_env() -> RelayResult<Self> {
        let config = GatewayConfig::from_env()?;
        Self::new(config)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// Attach the per-call correlation id and the forwarded authorization
    /// header, when the caller supplied one.
    fn with_relay_headers(
        &self,
        builder: RequestBuilder,
        authorization: Option<&str>,
    ) -> RequestBuilder {
        let correlation_id = Uuid::new_v4().to_string();
        let builder = builder.header(CORRELATION_HEADER, &correlation_id);
        match authorization {
            Some(auth) => builder.header("authorization", auth),
            None => builder,
        }
    }

    /// Dispatch and collect the upstream response as passthrough data.
    async fn dispatch(&self, builder: RequestBuilder) -> RelayResult<UpstreamResponse> {
        let response = builder
            .send()
            .await
            .map_err(|e| RelayError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| RelayError::UpstreamUnavailable(e.to_string()))?;

        if status >= 400 {
            warn!("Gateway error response: status={}, body={}", status, body);
        } else {
            debug!("Gateway response: status={}", status);
        }

        Ok(UpstreamResponse::new(status, body))
    }
}

#[async_trait]
impl UpstreamGateway for GatewayClient {
    #[instrument(skip(self, request, authorization), fields(ref3 = %request.ref3))]
    async fn create_qr(
        &self,
        request: &QrCreateRequest,
        authorization: Option<&str>,
    ) -> RelayResult<UpstreamResponse> {
        let body = QrCreateBody {
            qr_type: "PP",
            pp_type: "BILLERID",
            pp_id: &self.config.biller_id,
            amount: &request.amount,
            ref3: &request.ref3,
        };

        let builder = self.client.post(self.url(QR_CREATE_PATH)).json(&body);
        self.dispatch(self.with_relay_headers(builder, authorization))
            .await
    }

    #[instrument(skip(self, authorization), fields(trans_ref = %trans_ref))]
    async fn verify_slip(
        &self,
        trans_ref: &str,
        sending_bank: &str,
        authorization: Option<&str>,
    ) -> RelayResult<UpstreamResponse> {
        let builder = self
            .client
            .get(format!("{}/{}", self.url(SLIP_VERIFY_PATH), trans_ref))
            .query(&[("sendingBank", sending_bank)]);

        self.dispatch(self.with_relay_headers(builder, authorization))
            .await
    }

    #[instrument(skip(self, request, authorization), fields(partner_txn = %partner_transaction_id))]
    async fn confirm_payment(
        &self,
        request: &ConfirmPaymentRequest,
        partner_transaction_id: &str,
        authorization: Option<&str>,
    ) -> RelayResult<UpstreamResponse> {
        let body = ConfirmBody {
            qr_data: &request.qr_data,
            payee_id: &self.config.biller_id,
            transaction_amount: &request.transaction_amount,
            reference1: CONFIRM_REFERENCE,
            partner_transaction_id,
        };

        let builder = self.client.post(self.url(CONFIRM_PATH)).json(&body);
        self.dispatch(self.with_relay_headers(builder, authorization))
            .await
    }

    fn biller_id(&self) -> &str {
        &self.config.biller_id
    }
}

// =============================================================================
// Outbound body types (bank gateway wire format)
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QrCreateBody<'a> {
    qr_type: &'a str,
    pp_type: &'a str,
    pp_id: &'a str,
    amount: &'a serde_json::Value,
    ref3: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConfirmBody<'a> {
    qr_data: &'a str,
    payee_id: &'a str,
    transaction_amount: &'a serde_json::Value,
    reference1: &'a str,
    partner_transaction_id: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, header_exists, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base_url: &str) -> GatewayClient {
        GatewayClient::new(GatewayConfig::new(base_url, "311040039475231")).unwrap()
    }

    #[test]
    fn test_qr_create_body_wire_format() {
        let amount = json!(100.50);
        let body = QrCreateBody {
            qr_type: "PP",
            pp_type: "BILLERID",
            pp_id: "311040039475231",
            amount: &amount,
            ref3: "SCANME01",
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(
            value,
            json!({
                "qrType": "PP",
                "ppType": "BILLERID",
                "ppId": "311040039475231",
                "amount": 100.50,
                "ref3": "SCANME01"
            })
        );
    }

    #[test]
    fn test_confirm_body_wire_format() {
        let transaction_amount = json!("250.00");
        let body = ConfirmBody {
            qr_data: "0046000600000101030060217...",
            payee_id: "311040039475231",
            transaction_amount: &transaction_amount,
            reference1: CONFIRM_REFERENCE,
            partner_transaction_id: "31104003947523131104003947523120240307090542RTPCFM",
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["payeeId"], "311040039475231");
        assert_eq!(value["reference1"], "BSCANC");
        assert!(value.get("partnerTransactionId").is_some());
        assert!(value.get("qrData").is_some());
        assert!(value.get("transactionAmount").is_some());
    }

    #[tokio::test]
    async fn test_create_qr_forwards_amount_and_ref3_unchanged() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(QR_CREATE_PATH))
            .and(header_exists("requestUId"))
            .and(header("authorization", "Bearer merchant-token"))
            .and(body_json(json!({
                "qrType": "PP",
                "ppType": "BILLERID",
                "ppId": "311040039475231",
                "amount": "100.50",
                "ref3": "SCANME01"
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_string(r#"{"qrRawData":"00020101..."}"#),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let request = QrCreateRequest {
            amount: json!("100.50"),
            ref3: "SCANME01".to_string(),
        };

        let response = client
            .create_qr(&request, Some("Bearer merchant-token"))
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert_eq!(response.body, r#"{"qrRawData":"00020101..."}"#);
    }

    #[tokio::test]
    async fn test_verify_slip_passes_sending_bank() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path(format!("{SLIP_VERIFY_PATH}/2024030712345678")))
            .and(query_param("sendingBank", "011"))
            .and(header_exists("requestUId"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":"SUCCESS"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let response = client
            .verify_slip("2024030712345678", "011", None)
            .await
            .unwrap();

        assert_eq!(response.status, 200);
    }

    #[tokio::test]
    async fn test_upstream_error_body_is_passthrough_not_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(QR_CREATE_PATH))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_string(r#"{"status":{"code":9400,"description":"bad ref3"}}"#),
            )
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let request = QrCreateRequest {
            amount: json!("1.00"),
            ref3: "???".to_string(),
        };

        let response = client.create_qr(&request, None).await.unwrap();
        assert_eq!(response.status, 400);
        assert!(response.body.contains("bad ref3"));
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_transport_failure_maps_to_upstream_unavailable() {
        // Nothing listens here; the connection is refused outright.
        let client = client_for("http://127.0.0.1:1");
        let request = QrCreateRequest {
            amount: json!("1.00"),
            ref3: "REF".to_string(),
        };

        let result = client.create_qr(&request, None).await;
        assert!(matches!(result, Err(RelayError::UpstreamUnavailable(_))));
    }

    #[tokio::test]
    async fn test_confirm_payment_sends_derived_id_and_fixed_reference() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path(CONFIRM_PATH))
            .and(body_json(json!({
                "qrData": "00460006000001",
                "payeeId": "311040039475231",
                "transactionAmount": "250.00",
                "reference1": "BSCANC",
                "partnerTransactionId": "TXN-UNDER-TEST"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"status":"CONFIRMED"}"#))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server.uri());
        let request = ConfirmPaymentRequest {
            qr_data: "00460006000001".to_string(),
            transaction_amount: json!("250.00"),
        };

        let response = client
            .confirm_payment(&request, "TXN-UNDER-TEST", None)
            .await
            .unwrap();

        assert_eq!(response.status, 200);
        assert!(response.body.contains("CONFIRMED"));
    }
}
