//! Delivery counters for the channel sink
//!
//! Delivery is best-effort: a full subscriber channel drops the message for
//! that subscriber only. These counters make the loss observable.

use std::sync::atomic::{AtomicU64, Ordering};

/// # Example
///
/// ```
/// use rust_fanout_logger::DeliveryMetrics;
///
/// let metrics = DeliveryMetrics::new();
/// metrics.record_published();
/// metrics.record_delivered();
/// metrics.record_dropped();
///
/// assert_eq!(metrics.published(), 1);
/// assert_eq!(metrics.delivered(), 1);
/// assert_eq!(metrics.dropped(), 1);
/// ```
#[derive(Debug)]
pub struct DeliveryMetrics {
    /// Records built by emissions that had at least one subscriber
    published: AtomicU64,

    /// Copies placed on a subscriber channel
    delivered: AtomicU64,

    /// Copies lost because a subscriber channel was full
    dropped: AtomicU64,
}

impl DeliveryMetrics {
    pub const fn new() -> Self {
        Self {
            published: AtomicU64::new(0),
            delivered: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn published(&self) -> u64 {
        self.published.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn delivered(&self) -> u64 {
        self.delivered.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_published(&self) -> u64 {
        self.published.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_delivered(&self) -> u64 {
        self.delivered.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dropped(&self) -> u64 {
        self.dropped.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of subscriber copies that were dropped, as a percentage
    ///
    /// Returns 0.0 if nothing has been delivered or dropped yet.
    pub fn drop_rate(&self) -> f64 {
        let dropped = self.dropped() as f64;
        let total = self.delivered() as f64 + dropped;
        if total == 0.0 {
            0.0
        } else {
            (dropped / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.published.store(0, Ordering::Relaxed);
        self.delivered.store(0, Ordering::Relaxed);
        self.dropped.store(0, Ordering::Relaxed);
    }
}

impl Default for DeliveryMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DeliveryMetrics {
    /// Snapshot of the current values
    fn clone(&self) -> Self {
        Self {
            published: AtomicU64::new(self.published()),
            delivered: AtomicU64::new(self.delivered()),
            dropped: AtomicU64::new(self.dropped()),
        }
    }
}
