//! # Callback Broadcast Topic
//!
//! Fan-out of bank payment callbacks to every currently-subscribed client
//! connection. Built on `tokio::sync::broadcast`: publishing writes to a
//! snapshot of the current subscriber set and never mutates it, so
//! concurrent connect/disconnect needs no locking here.
//!
//! Delivery is at-most-once and best-effort. There is no replay buffer
//! beyond the channel capacity; a subscriber that lags far enough behind
//! simply loses messages.

use tokio::sync::broadcast;

const DEFAULT_CHANNEL_CAPACITY: usize = 128;

/// A published callback envelope: the bank's JSON body, verbatim.
pub type CallbackEnvelope = serde_json::Value;

/// Broadcast topic for payment-completion callbacks.
///
/// Cheap to clone; all clones publish into the same channel.
#[derive(Debug, Clone)]
pub struct CallbackTopic {
    tx: broadcast::Sender<CallbackEnvelope>,
}

impl CallbackTopic {
    /// Create a topic with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CHANNEL_CAPACITY)
    }

    /// Create a topic with an explicit channel capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe; the receiver sees every envelope published after this
    /// call, subject to the capacity bound.
    pub fn subscribe(&self) -> broadcast::Receiver<CallbackEnvelope> {
        self.tx.subscribe()
    }

    /// Publish an envelope to all current subscribers.
    ///
    /// Returns the number of subscribers the envelope was queued for.
    /// Zero subscribers is not an error; the envelope is dropped.
    pub fn publish(&self, envelope: CallbackEnvelope) -> usize {
        match self.tx.send(envelope) {
            Ok(n) => n,
            Err(_) => 0,
        }
    }

    /// Number of currently-subscribed receivers.
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}

impl Default for CallbackTopic {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_publish_without_subscribers_is_dropped() {
        let topic = CallbackTopic::new();
        assert_eq!(topic.subscriber_count(), 0);
        assert_eq!(topic.publish(json!({"transactionId": "T0"})), 0);
    }

    #[tokio::test]
    async fn test_all_subscribers_receive_verbatim_envelope() {
        let topic = CallbackTopic::new();
        let mut rx_a = topic.subscribe();
        let mut rx_b = topic.subscribe();

        let envelope = json!({"transactionId": "T1", "status": "SUCCESS"});
        assert_eq!(topic.publish(envelope.clone()), 2);

        assert_eq!(rx_a.recv().await.unwrap(), envelope);
        assert_eq!(rx_b.recv().await.unwrap(), envelope);
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_envelopes() {
        let topic = CallbackTopic::new();
        let mut rx_early = topic.subscribe();

        topic.publish(json!({"transactionId": "T2"}));
        let mut rx_late = topic.subscribe();
        topic.publish(json!({"transactionId": "T3"}));

        assert_eq!(
            rx_early.recv().await.unwrap(),
            json!({"transactionId": "T2"})
        );
        assert_eq!(
            rx_early.recv().await.unwrap(),
            json!({"transactionId": "T3"})
        );
        // The late subscriber only sees what was published after it joined
        assert_eq!(
            rx_late.recv().await.unwrap(),
            json!({"transactionId": "T3"})
        );
    }
}
