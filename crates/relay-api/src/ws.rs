//! # WebSocket Subscription Endpoint
//!
//! The real-time transport for bank payment callbacks. Each connected
//! client gets its own broadcast receiver; every callback envelope is
//! delivered as a single JSON text frame.
//!
//! Delivery is best-effort: a client that lags behind the channel
//! capacity loses the dropped envelopes and keeps receiving from the
//! current position. No replay, no acknowledgment.

use crate::state::AppState;
use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use relay_core::CallbackEnvelope;
use tokio::sync::broadcast;
use tracing::{debug, warn};

/// Upgrade handler for `GET /ws/payments`
pub async fn payments_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    let rx = state.topic.subscribe();
    ws.on_upgrade(move |socket| stream_callbacks(socket, rx))
}

async fn stream_callbacks(
    mut socket: WebSocket,
    mut rx: broadcast::Receiver<CallbackEnvelope>,
) {
    debug!("Payment subscriber connected");

    loop {
        tokio::select! {
            envelope = rx.recv() => match envelope {
                Ok(envelope) => {
                    let frame = envelope.to_string();
                    if socket.send(Message::Text(frame.into())).await.is_err() {
                        break;
                    }
                }
                Err(broadcast::error::RecvError::Lagged(dropped)) => {
                    warn!("Payment subscriber lagged, dropped {} callbacks", dropped);
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            inbound = socket.recv() => match inbound {
                // Clients only listen on this channel; anything inbound
                // besides close is ignored.
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                Some(Ok(_)) => {}
            },
        }
    }

    debug!("Payment subscriber disconnected");
}
