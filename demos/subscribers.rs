//! Subscriber example
//!
//! Demonstrates the channel sink: filtered subscriptions, listener threads
//! and delivery metrics.
//!
//! Run with: cargo run --example subscribers

use rust_fanout_logger::prelude::*;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Rust Fanout Logger - Subscribers Example ===\n");

    let facade = Arc::new(
        Facade::builder()
            .level(Level::Debug)
            .sink(ConsoleSink::new())
            .sink(ChannelSink::new())
            .build(),
    );

    println!("1. Listener thread:");
    let listener = facade.on_message("printer", |msg| {
        println!("   [listener] {}", msg.render());
    });
    println!("   Registered {}", listener);

    println!("\n2. Filtered receiver:");
    let errors = facade
        .with_sink(|channel: &ChannelSink| {
            channel.subscribe("errors", |msg| msg.level == LogKind::Error)
        })
        .map(|(_, rx)| rx);

    let mut handles = vec![];
    for worker in 0..3 {
        let facade = Arc::clone(&facade);
        handles.push(thread::spawn(move || {
            for job in 0..3 {
                if job == 2 && worker == 1 {
                    facade.error(format_args!("worker {} failed job {}", worker, job));
                } else {
                    facade.debug(format_args!("worker {} finished job {}", worker, job));
                }
            }
        }));
    }
    for handle in handles {
        let _ = handle.join();
    }

    if let Some(errors) = errors {
        for msg in errors.try_iter() {
            println!("   [errors] {} at {}", msg.message, msg.timestamp);
        }
    }

    thread::sleep(Duration::from_millis(50));
    facade.remove_message_handler(&listener);

    println!("\n3. Delivery metrics:");
    if let Some((published, delivered, dropped)) = facade.with_sink(|channel: &ChannelSink| {
        let metrics = channel.metrics();
        (metrics.published(), metrics.delivered(), metrics.dropped())
    }) {
        println!(
            "   published={} delivered={} dropped={}",
            published, delivered, dropped
        );
    }

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
