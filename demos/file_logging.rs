//! File logging example
//!
//! Demonstrates logging to the console and a rotating file at the same time.
//!
//! Run with: cargo run --example file_logging

use rust_fanout_logger::prelude::*;

fn main() -> Result<()> {
    println!("=== Rust Fanout Logger - File Logging Example ===\n");

    let facade = Facade::builder()
        .level(Level::Debug)
        .sink(ConsoleSink::new())
        .sink(FileSink::new("application.log").with_max_file_size(4 * 1024))
        .timestamp(true)
        .build();

    println!("1. Logging to both console and file:");
    facade.info(format_args!("Application started"));
    facade.debug(format_args!("Loading configuration..."));
    facade.warn(format_args!("Using default settings for some options"));
    facade.error(format_args!("Failed to load optional plugin"));

    println!("\n2. Writing enough to rotate:");
    for i in 1..=200 {
        facade.debug(format_args!("Processing item {}/200", i));
    }
    facade.info(format_args!("All operations completed"));

    facade.flush()?;

    if let Some(backup) = facade.with_sink(|file: &FileSink| file.backup_path(1)) {
        println!("\nRotated output lives in {}", backup.display());
    }

    println!("\n=== Example completed successfully! ===");
    println!("Check 'application.log' for the latest log output");
    Ok(())
}
