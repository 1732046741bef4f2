use tokio::sync::broadcast;

/// The single well-known topic all document traffic rides on.
pub const DOCUMENT_TOPIC: &str = "document-updates";

/// Control message telling connected clients to reload after a rebuild.
pub fn reload_message() -> String {
    serde_json::json!({ "type": "reload" }).to_string()
}

/// In-process fan-out for one topic.
///
/// Payloads are opaque strings; the channel never parses them. Delivery
/// is at-most-once and fire-and-forget: publishing with zero subscribers
/// is a no-op, and a subscriber that falls behind its buffer drops
/// messages without blocking the publisher or its peers.
#[derive(Clone)]
pub struct BroadcastChannel {
    topic: &'static str,
    sender: broadcast::Sender<String>,
}

impl BroadcastChannel {
    /// Create a channel buffering up to `capacity` messages per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self {
            topic: DOCUMENT_TOPIC,
            sender,
        }
    }

    pub fn topic(&self) -> &str {
        self.topic
    }

    /// Join the topic. Subscription lasts until the receiver is dropped
    /// (the connection's disconnect).
    pub fn subscribe(&self) -> broadcast::Receiver<String> {
        self.sender.subscribe()
    }

    /// Publish a message to every current subscriber. Returns how many
    /// subscribers there were; zero is not an error.
    pub fn publish(&self, message: impl Into<String>) -> usize {
        self.sender.send(message.into()).unwrap_or(0)
    }

    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}

impl Default for BroadcastChannel {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_publish_reaches_every_subscriber() {
        let channel = BroadcastChannel::new(8);
        let mut a = channel.subscribe();
        let mut b = channel.subscribe();

        let delivered = channel.publish("hello");
        assert_eq!(delivered, 2);
        assert_eq!(a.recv().await.unwrap(), "hello");
        assert_eq!(b.recv().await.unwrap(), "hello");
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_a_noop() {
        let channel = BroadcastChannel::new(8);
        assert_eq!(channel.publish("into the void"), 0);
    }

    #[tokio::test]
    async fn test_unsubscribe_on_drop() {
        let channel = BroadcastChannel::new(8);
        let a = channel.subscribe();
        let _b = channel.subscribe();
        assert_eq!(channel.subscriber_count(), 2);

        drop(a);
        assert_eq!(channel.subscriber_count(), 1);
        assert_eq!(channel.publish("still here"), 1);
    }

    #[tokio::test]
    async fn test_reload_message_shape() {
        let msg = reload_message();
        let value: serde_json::Value = serde_json::from_str(&msg).unwrap();
        assert_eq!(value["type"], "reload");
    }

    #[tokio::test]
    async fn test_lagging_subscriber_drops_without_blocking() {
        let channel = BroadcastChannel::new(2);
        let mut slow = channel.subscribe();

        for i in 0..10 {
            channel.publish(format!("msg {i}"));
        }

        // The slow receiver lost the overflow but the channel stayed live.
        match slow.recv().await {
            Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                assert!(skipped > 0);
            }
            other => panic!("expected lag, got {other:?}"),
        }
        assert_eq!(slow.recv().await.unwrap(), "msg 8");
    }
}
