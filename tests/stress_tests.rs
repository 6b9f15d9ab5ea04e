//! Stress tests for concurrent publishing and subscription churn
//!
//! These tests verify:
//! - Publishers never block on slow subscribers
//! - Every message is either delivered or counted as dropped
//! - Subscribe/unsubscribe/close are safe while other threads publish
//! - Fan-out through the facade is thread safe

use rust_fanout_logger::prelude::*;
use rust_fanout_logger::sinks::SUBSCRIBER_CAPACITY;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

/// Delivered plus dropped always equals what subscribers were offered
#[test]
fn test_concurrent_publish_accounts_for_every_message() {
    let sink = Arc::new(ChannelSink::new());
    let (_, rx) = sink.channel();

    let mut handles = vec![];
    for t in 0..8 {
        let sink = Arc::clone(&sink);
        handles.push(thread::spawn(move || {
            for i in 0..500 {
                sink.info(format_args!("thread {} message {}", t, i)).unwrap();
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Publisher panicked");
    }

    let metrics = sink.metrics();
    assert_eq!(metrics.published(), 4000);
    assert_eq!(metrics.delivered() + metrics.dropped(), 4000);
    assert_eq!(rx.len() as u64, metrics.delivered());
    assert!(rx.len() <= SUBSCRIBER_CAPACITY);
}

/// A draining subscriber keeps up while an idle one overflows
#[test]
fn test_slow_subscriber_isolated_from_fast_one() {
    let sink = Arc::new(ChannelSink::new());
    let (_, _idle) = sink.subscribe("idle", |_| true);
    let (fast_id, fast) = sink.subscribe("fast", |_| true);

    let received = Arc::new(AtomicUsize::new(0));
    let received_clone = Arc::clone(&received);
    let consumer = thread::spawn(move || {
        for _ in fast.iter() {
            received_clone.fetch_add(1, Ordering::Relaxed);
        }
    });

    for i in 0..1000 {
        sink.debug(format_args!("burst {}", i)).unwrap();
        if i % 50 == 0 {
            thread::sleep(Duration::from_millis(1));
        }
    }

    assert!(sink.unsubscribe(&fast_id));
    consumer.join().expect("Consumer panicked");

    // the idle subscriber alone accounts for most drops
    assert!(sink.metrics().dropped() >= (1000 - SUBSCRIBER_CAPACITY) as u64);
    assert!(received.load(Ordering::Relaxed) >= SUBSCRIBER_CAPACITY);
}

/// Subscription churn while publishers are running
#[test]
fn test_subscribe_unsubscribe_while_publishing() {
    let sink = Arc::new(ChannelSink::new());
    let running = Arc::new(std::sync::atomic::AtomicBool::new(true));

    let mut publishers = vec![];
    for t in 0..4 {
        let sink = Arc::clone(&sink);
        let running = Arc::clone(&running);
        publishers.push(thread::spawn(move || {
            let mut sent = 0;
            while running.load(Ordering::Relaxed) {
                sink.warn(format_args!("publisher {} #{}", t, sent)).unwrap();
                sent += 1;
            }
            sent
        }));
    }

    for round in 0..200 {
        let (id, rx) = sink.subscribe(&format!("churn-{}", round), |_| true);
        let _ = rx.try_recv();
        assert!(sink.unsubscribe(&id));
        if round % 50 == 0 {
            sink.close();
        }
    }

    running.store(false, Ordering::Relaxed);
    let total: usize = publishers
        .into_iter()
        .map(|h| h.join().expect("Publisher panicked"))
        .sum();

    assert!(total > 0);
    assert_eq!(sink.subscriber_count(), 0);
}

/// Facade fan-out from many threads with a listener attached
#[test]
fn test_facade_concurrent_fanout() {
    let facade = Arc::new(
        Facade::builder()
            .level(Level::Debug)
            .sink(MemorySink::new())
            .sink(ChannelSink::new())
            .build(),
    );

    let heard = Arc::new(AtomicUsize::new(0));
    let heard_clone = Arc::clone(&heard);
    let id = facade.on_message("counter", move |_| {
        heard_clone.fetch_add(1, Ordering::Relaxed);
    });

    let mut handles = vec![];
    for t in 0..4 {
        let facade = Arc::clone(&facade);
        handles.push(thread::spawn(move || {
            for i in 0..50 {
                facade.info(format_args!("thread {} info {}", t, i));
                facade.debug(format_args!("thread {} debug {}", t, i));
            }
        }));
    }

    for handle in handles {
        handle.join().expect("Thread panicked");
    }

    assert_eq!(facade.with_sink(|s: &MemorySink| s.len()), Some(400));

    let published = facade
        .with_sink(|s: &ChannelSink| s.metrics().published())
        .unwrap();
    assert_eq!(published, 400);

    // wait for the listener to drain what was delivered
    let delivered = facade
        .with_sink(|s: &ChannelSink| s.metrics().delivered())
        .unwrap() as usize;
    let deadline = std::time::Instant::now() + Duration::from_secs(5);
    while heard.load(Ordering::Relaxed) < delivered && std::time::Instant::now() < deadline {
        thread::sleep(Duration::from_millis(10));
    }
    assert_eq!(heard.load(Ordering::Relaxed), delivered);

    assert!(facade.remove_message_handler(&id));
}

/// Registration racing with emission
#[test]
fn test_register_while_logging() {
    let facade = Arc::new(Facade::new());

    let logger = {
        let facade = Arc::clone(&facade);
        thread::spawn(move || {
            for i in 0..1000 {
                facade.notice(format_args!("notice {}", i));
            }
        })
    };

    thread::sleep(Duration::from_millis(1));
    assert!(facade.register(&MemorySink::new()));
    logger.join().expect("Logger panicked");

    let captured = facade.with_sink(|s: &MemorySink| s.len()).unwrap();
    assert!(captured <= 1000);
}
