//! Publish/subscribe sink
//!
//! Every emission becomes one [`LogMessage`] that is offered to each
//! subscriber whose filter accepts it. Each subscriber owns a bounded
//! channel; delivery never blocks the caller, so a subscriber that falls
//! behind by [`SUBSCRIBER_CAPACITY`] messages loses new ones until it
//! catches up.
//!
//! # Example
//!
//! ```
//! use rust_fanout_logger::sinks::ChannelSink;
//! use rust_fanout_logger::{LogKind, Sink};
//!
//! let sink = ChannelSink::new();
//! let (id, errors) = sink.subscribe("errors", |msg| msg.level == LogKind::Error);
//! assert_eq!(id, "sub_errors");
//!
//! sink.info(format_args!("ignored")).unwrap();
//! sink.error(format_args!("disk {} full", "/var")).unwrap();
//!
//! let msg = errors.try_recv().unwrap();
//! assert_eq!(msg.message, "disk /var full");
//! assert!(errors.try_recv().is_err());
//! ```

use super::text::Decorations;
use crate::core::{DeliveryMetrics, Event, LogMessage, Result, Sink, SinkKind};
use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};
use indexmap::IndexMap;
use parking_lot::RwLock;
use std::any::Any;
use std::sync::Arc;

/// Buffered messages per subscriber before new ones are dropped
pub const SUBSCRIBER_CAPACITY: usize = 100;

/// Prefix of every subscription id
pub const SUBSCRIPTION_PREFIX: &str = "sub_";

/// Predicate deciding which messages a subscriber receives
pub type Filter = Arc<dyn Fn(&LogMessage) -> bool + Send + Sync>;

struct Subscriber {
    filter: Filter,
    sender: Sender<LogMessage>,
    /// Handed out again when the same id subscribes twice
    receiver: Receiver<LogMessage>,
}

/// Result of [`ChannelSink::subscribe_detailed`]
pub struct Subscription {
    pub id: String,
    pub receiver: Receiver<LogMessage>,
    /// False when the id was already subscribed and the existing channel
    /// was returned
    pub created: bool,
}

#[derive(Default)]
pub struct ChannelSink {
    decorations: Decorations,
    subscribers: RwLock<IndexMap<String, Subscriber>>,
    metrics: DeliveryMetrics,
}

impl ChannelSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a filtered subscriber
    ///
    /// The subscription id is `"sub_" + id`; an empty `id` is replaced by a
    /// random UUID. Subscribing again with an id that is already present
    /// returns the existing id and channel and keeps the original filter.
    pub fn subscribe<F>(&self, id: &str, filter: F) -> (String, Receiver<LogMessage>)
    where
        F: Fn(&LogMessage) -> bool + Send + Sync + 'static,
    {
        let subscription = self.subscribe_detailed(id, Arc::new(filter));
        (subscription.id, subscription.receiver)
    }

    /// Like [`subscribe`](Self::subscribe), also reporting whether a new
    /// subscription was created
    pub fn subscribe_detailed(&self, id: &str, filter: Filter) -> Subscription {
        let id = if id.is_empty() {
            uuid::Uuid::new_v4().to_string()
        } else {
            id.to_string()
        };
        let sub_id = format!("{}{}", SUBSCRIPTION_PREFIX, id);

        // check and insert under one write lock so two callers with the
        // same id end up sharing one channel
        let mut subscribers = self.subscribers.write();
        if let Some(existing) = subscribers.get(&sub_id) {
            return Subscription {
                id: sub_id,
                receiver: existing.receiver.clone(),
                created: false,
            };
        }

        let (sender, receiver) = bounded(SUBSCRIBER_CAPACITY);
        subscribers.insert(
            sub_id.clone(),
            Subscriber {
                filter,
                sender,
                receiver: receiver.clone(),
            },
        );

        Subscription {
            id: sub_id,
            receiver,
            created: true,
        }
    }

    /// Subscribe to every message under a generated id
    pub fn channel(&self) -> (String, Receiver<LogMessage>) {
        self.subscribe("", |_| true)
    }

    /// Remove a subscription and close its channel
    ///
    /// Returns false for an unknown id. Receivers drain what was already
    /// buffered and then observe disconnection.
    pub fn unsubscribe(&self, subscription_id: &str) -> bool {
        let removed = self.subscribers.write().shift_remove(subscription_id);
        // sender drops here, after the map no longer references it
        removed.is_some()
    }

    /// Close every subscription
    pub fn close(&self) {
        let drained: Vec<Subscriber> = {
            let mut subscribers = self.subscribers.write();
            subscribers.drain(..).map(|(_, sub)| sub).collect()
        };
        drop(drained);
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }

    pub fn contains(&self, subscription_id: &str) -> bool {
        self.subscribers.read().contains_key(subscription_id)
    }

    pub fn subscription_ids(&self) -> Vec<String> {
        self.subscribers.read().keys().cloned().collect()
    }

    pub fn metrics(&self) -> &DeliveryMetrics {
        &self.metrics
    }

    fn publish(&self, message: LogMessage) {
        let subscribers = self.subscribers.read();
        if subscribers.is_empty() {
            return;
        }
        self.metrics.record_published();

        for (id, subscriber) in subscribers.iter() {
            if !(subscriber.filter)(&message) {
                continue;
            }
            match subscriber.sender.try_send(message.clone()) {
                Ok(()) => {
                    self.metrics.record_delivered();
                }
                Err(TrySendError::Full(_)) => {
                    let dropped = self.metrics.record_dropped();
                    if dropped == 0 || (dropped + 1) % 1000 == 0 {
                        eprintln!(
                            "[LOGGER WARNING] Subscriber '{}' is full, {} messages dropped so far",
                            id,
                            dropped + 1
                        );
                    }
                }
                Err(TrySendError::Disconnected(_)) => {
                    // the map keeps a receiver alive; unreachable while subscribed
                }
            }
        }
    }
}

impl Sink for ChannelSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Channel
    }

    fn init(&self) -> Box<dyn Sink> {
        Box::new(Self::new())
    }

    /// Stored only; records always carry their own timestamp
    fn use_timestamp(&self, value: bool) {
        self.decorations.set_timestamp(value);
    }

    fn use_correlation_id(&self, value: bool) {
        self.decorations.set_correlation_id(value);
    }

    fn use_icons(&self, value: bool) {
        self.decorations.set_icons(value);
    }

    fn is_timestamp_enabled(&self) -> bool {
        self.decorations.timestamp()
    }

    fn write(&self, event: &Event<'_>) -> Result<()> {
        if self.subscribers.read().is_empty() {
            return Ok(());
        }

        let mut text = event.message();
        if self.decorations.icons() && !event.icon.is_empty() {
            text = format!("{} {}", event.icon, text);
        }

        let message = LogMessage::new(event.kind, text, event.icon).with_task(event.is_task);
        self.publish(message);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

impl Drop for ChannelSink {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{icon, LogKind};
    use crossbeam_channel::TryRecvError;

    #[test]
    fn test_subscribe_prefixes_id() {
        let sink = ChannelSink::new();
        let (id, _rx) = sink.subscribe("sub1", |_| true);
        assert_eq!(id, "sub_sub1");
        assert!(sink.contains("sub_sub1"));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let sink = ChannelSink::new();
        let (a, _rx_a) = sink.channel();
        let (b, _rx_b) = sink.channel();

        assert!(a.starts_with(SUBSCRIPTION_PREFIX));
        assert_ne!(a, b);
        assert_eq!(sink.subscriber_count(), 2);
    }

    #[test]
    fn test_subscribe_is_idempotent() {
        let sink = ChannelSink::new();
        let (id1, rx1) = sink.subscribe("x", |_| true);
        let (id2, rx2) = sink.subscribe("x", |_| false);

        assert_eq!(id1, id2);
        assert!(rx1.same_channel(&rx2));
        assert_eq!(sink.subscriber_count(), 1);

        // original filter kept
        sink.info(format_args!("still delivered")).unwrap();
        assert_eq!(rx2.try_recv().unwrap().message, "still delivered");
    }

    #[test]
    fn test_detailed_reports_creation() {
        let sink = ChannelSink::new();
        let first = sink.subscribe_detailed("x", Arc::new(|_: &LogMessage| true));
        let second = sink.subscribe_detailed("x", Arc::new(|_: &LogMessage| true));
        assert!(first.created);
        assert!(!second.created);
    }

    #[test]
    fn test_no_subscribers_is_noop() {
        let sink = ChannelSink::new();
        sink.info(format_args!("nobody listens")).unwrap();
        assert_eq!(sink.metrics().published(), 0);
    }

    #[test]
    fn test_icon_prefix() {
        let sink = ChannelSink::new();
        let (_, rx) = sink.channel();

        sink.success(format_args!("plain")).unwrap();
        sink.use_icons(true);
        sink.success(format_args!("decorated")).unwrap();
        sink.log(crate::core::Level::Info, format_args!("no icon")).unwrap();

        let first = rx.try_recv().unwrap();
        assert_eq!(first.message, "plain");
        assert_eq!(first.icon, icon::THUMBS_UP);
        assert_eq!(first.level, LogKind::Success);

        let second = rx.try_recv().unwrap();
        assert_eq!(second.message, format!("{} decorated", icon::THUMBS_UP));

        assert_eq!(rx.try_recv().unwrap().message, "no icon");
    }

    #[test]
    fn test_full_channel_drops_without_blocking() {
        let sink = ChannelSink::new();
        let (_, rx) = sink.channel();

        for i in 0..=SUBSCRIBER_CAPACITY {
            sink.info(format_args!("msg {}", i)).unwrap();
        }

        assert_eq!(rx.len(), SUBSCRIBER_CAPACITY);
        assert_eq!(sink.metrics().dropped(), 1);
        assert_eq!(rx.try_recv().unwrap().message, "msg 0");
    }

    #[test]
    fn test_unsubscribe_closes_channel() {
        let sink = ChannelSink::new();
        let (id, rx) = sink.channel();
        sink.warn(format_args!("buffered")).unwrap();

        assert!(sink.unsubscribe(&id));
        assert!(!sink.unsubscribe(&id));

        assert_eq!(rx.try_recv().unwrap().message, "buffered");
        assert_eq!(rx.try_recv(), Err(TryRecvError::Disconnected));
    }

    #[test]
    fn test_close_clears_everything() {
        let sink = ChannelSink::new();
        let (a, rx_a) = sink.channel();
        let (_, rx_b) = sink.subscribe("b", |_| true);

        sink.close();
        sink.close();

        assert_eq!(sink.subscriber_count(), 0);
        assert!(!sink.unsubscribe(&a));
        assert!(rx_a.recv().is_err());
        assert!(rx_b.recv().is_err());
    }

    #[test]
    fn test_task_flag() {
        let sink = ChannelSink::new();
        let (_, rx) = sink.channel();

        sink.task_success(format_args!("built"), false).unwrap();
        let msg = rx.try_recv().unwrap();
        assert!(msg.is_task);
        assert_eq!(msg.icon, "");
    }
}
