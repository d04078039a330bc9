//! # Invalidation Channel
//!
//! A process-wide publish/subscribe signal. Components that persist a new
//! bill publish a named, payload-free event; any number of list-views
//! subscribe and re-fetch on receipt.
//!
//! ## Delivery Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Invalidation Bus                                     │
//! │                                                                         │
//! │  commit succeeds ──► publish("bill:created")                            │
//! │                            │                                            │
//! │            ┌───────────────┼───────────────┐                            │
//! │            ▼               ▼               ▼                            │
//! │      bill list        dashboard       (subscriber joined               │
//! │      re-fetches       re-aggregates    after publish:                  │
//! │                                        sees nothing)                   │
//! │                                                                         │
//! │  • publish happens only after persistence succeeds                     │
//! │  • at-least-once to currently-subscribed listeners                     │
//! │  • fire-and-forget: a slow subscriber never blocks the publisher       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::broadcast;
use tracing::debug;

// =============================================================================
// Topics
// =============================================================================

/// Well-known bus topics.
pub mod topics {
    /// Published after a new bill is successfully persisted.
    pub const BILL_CREATED: &str = "bill:created";
}

/// Buffered notifications per topic before a lagging receiver drops some.
const TOPIC_CAPACITY: usize = 64;

// =============================================================================
// Invalidation Bus
// =============================================================================

/// Topic-keyed broadcast bus carrying payload-free notifications.
///
/// Senders are created lazily per topic. Publishing to a topic nobody
/// listens to is fine and costs nothing; receivers created after a
/// publish do not see it retroactively.
pub struct InvalidationBus {
    senders: Mutex<HashMap<String, broadcast::Sender<()>>>,
}

impl InvalidationBus {
    /// Creates an empty bus.
    pub fn new() -> Self {
        InvalidationBus {
            senders: Mutex::new(HashMap::new()),
        }
    }

    /// Publishes a notification on `topic`.
    ///
    /// Non-blocking fire-and-forget: the send result (including "no
    /// receivers") is deliberately ignored.
    pub fn publish(&self, topic: &str) {
        let senders = self.senders.lock().expect("bus mutex poisoned");
        if let Some(tx) = senders.get(topic) {
            let delivered = tx.send(()).unwrap_or(0);
            debug!(topic, delivered, "invalidation published");
        } else {
            debug!(topic, "invalidation published with no subscribers");
        }
    }

    /// Subscribes to `topic`.
    ///
    /// The returned receiver sees every notification published while it
    /// lives; dropping it unsubscribes.
    pub fn subscribe(&self, topic: &str) -> broadcast::Receiver<()> {
        let mut senders = self.senders.lock().expect("bus mutex poisoned");
        senders
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(TOPIC_CAPACITY).0)
            .subscribe()
    }
}

impl Default for InvalidationBus {
    fn default() -> Self {
        InvalidationBus::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::broadcast::error::TryRecvError;

    #[tokio::test]
    async fn test_subscriber_receives_publish() {
        let bus = InvalidationBus::new();
        let mut rx = bus.subscribe(topics::BILL_CREATED);

        bus.publish(topics::BILL_CREATED);
        assert_eq!(rx.recv().await, Ok(()));
    }

    #[tokio::test]
    async fn test_late_subscriber_misses_earlier_publish() {
        let bus = InvalidationBus::new();
        // Keep the topic's sender alive so the publish has somewhere to go.
        let _early = bus.subscribe(topics::BILL_CREATED);

        bus.publish(topics::BILL_CREATED);

        let mut late = bus.subscribe(topics::BILL_CREATED);
        assert_eq!(late.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_does_not_panic() {
        let bus = InvalidationBus::new();
        bus.publish("nobody:listens");
    }

    #[tokio::test]
    async fn test_independent_topics() {
        let bus = InvalidationBus::new();
        let mut created = bus.subscribe(topics::BILL_CREATED);
        let mut other = bus.subscribe("bill:deleted");

        bus.publish(topics::BILL_CREATED);

        assert_eq!(created.recv().await, Ok(()));
        assert_eq!(other.try_recv(), Err(TryRecvError::Empty));
    }

    #[tokio::test]
    async fn test_every_current_subscriber_is_notified() {
        let bus = InvalidationBus::new();
        let mut a = bus.subscribe(topics::BILL_CREATED);
        let mut b = bus.subscribe(topics::BILL_CREATED);

        bus.publish(topics::BILL_CREATED);

        assert_eq!(a.recv().await, Ok(()));
        assert_eq!(b.recv().await, Ok(()));
    }
}
