//! Basic facade usage example
//!
//! Demonstrates console output, level gating, icons and highlighted words.
//!
//! Run with: cargo run --example basic_usage

use rust_fanout_logger::prelude::*;
use rust_fanout_logger::{info, warn};

fn main() -> Result<()> {
    println!("=== Rust Fanout Logger - Basic Usage Example ===\n");

    let facade = Facade::builder()
        .level(Level::Trace)
        .sink(ConsoleSink::new())
        .icons(true)
        .build();

    println!("1. Logging at different levels:");
    facade.trace(format_args!("This is a trace message"));
    facade.debug(format_args!("This is a debug message"));
    facade.info(format_args!("This is an info message"));
    facade.warn(format_args!("This is a warning message"));
    facade.error(format_args!("This is an error message"));

    println!("\n2. Presentation kinds:");
    facade.success(format_args!("Build finished"));
    facade.notice(format_args!("A newer toolchain is available"));
    facade.command(format_args!("cargo test --all-features"));
    facade.disabled(format_args!("Coverage upload skipped"));
    facade.log_icon(icon::ROCKET, Level::Info, format_args!("Deploying release"));

    println!("\n3. Highlighted words:");
    facade.with_highlight_color(ColorCode::BrightCyan);
    facade.log_highlight("Copied {} files to {}", Level::Info, &[&42, &"dist/"]);

    println!("\n4. Raising the threshold:");
    facade.with_warning();
    info!(facade, "Info message (hidden)");
    warn!(facade, "Warning message (visible), level is {}", facade.level());

    println!("\n5. Timestamps:");
    facade.with_level(Level::Info).with_timestamp();
    info!(facade, "Timestamped message");
    facade.toggle_timestamp();
    info!(facade, "Timestamp toggled off");

    facade.flush()?;
    println!("\n=== Example completed successfully! ===");
    Ok(())
}
