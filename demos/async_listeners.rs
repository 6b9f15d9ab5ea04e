//! Async listener example
//!
//! Demonstrates listeners that run as tokio tasks.
//!
//! Run with: cargo run --example async_listeners --features async-listeners

use rust_fanout_logger::prelude::*;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    println!("=== Rust Fanout Logger - Async Listeners Example ===\n");

    let facade = Facade::builder()
        .sink(ChannelSink::new())
        .sink(MemorySink::new())
        .build();

    let handle = tokio::runtime::Handle::current();
    let id = facade.on_message_async("shipper", &handle, |msg| async move {
        // stand-in for a network call
        tokio::time::sleep(Duration::from_millis(5)).await;
        println!("   shipped: {}", msg.to_json().unwrap_or_default());
    });
    println!("Registered {}", id);

    for i in 0..5 {
        facade.info(format_args!("request {} served", i));
    }
    facade.warn(format_args!("cache miss ratio above threshold"));

    tokio::time::sleep(Duration::from_millis(200)).await;
    facade.remove_message_handler(&id);

    let captured = facade.with_sink(|memory: &MemorySink| memory.len()).unwrap_or(0);
    println!("\nMemory sink captured {} messages", captured);

    println!("\n=== Example completed successfully! ===");
    Ok(())
}
