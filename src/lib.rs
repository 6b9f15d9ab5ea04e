//! # Rust Fanout Logger
//!
//! A multi-sink logging facade. One call such as `info` or `error` is
//! checked against a shared level threshold and fanned out to every
//! registered sink: console, build pipeline, file, in-memory capture, or a
//! publish/subscribe channel that hands structured records to listeners.
//!
//! ## Features
//!
//! - **Fan-out**: at most one sink per kind, called in registration order
//! - **Pub/sub**: filtered subscribers with bounded, non-blocking delivery
//! - **Isolation**: a failing or panicking sink never affects the others
//! - **Decorations**: timestamps, correlation ids and icons per sink
//!
//! ```
//! use rust_fanout_logger::prelude::*;
//! use std::sync::mpsc;
//!
//! let facade = Facade::builder().sink(ChannelSink::new()).build();
//!
//! let (tx, rx) = mpsc::channel();
//! let id = facade.on_message("sub1", move |msg| {
//!     let _ = tx.send(msg);
//! });
//! assert_eq!(id, "sub_sub1");
//!
//! facade.info(format_args!("hello {}", "world"));
//! let msg = rx.recv().unwrap();
//! assert_eq!(msg.message, "hello world");
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub use crate::core::icon;

pub mod prelude {
    pub use crate::core::{
        icon, ColorCode, DeliveryMetrics, EnvConfig, Event, ExitPolicy, Facade, FacadeBuilder,
        Level, LogKind, LogMessage, LoggerError, Result, Sink, SinkKind, Termination,
        TimestampFormat,
    };
    pub use crate::sinks::{
        CapturedMessage, ChannelSink, ConsoleSink, FileSink, MemorySink, PipelineMode,
        PipelineSink,
    };
}

pub use crate::core::{
    interpolate, Body, ColorCode, DeliveryMetrics, EnvConfig, Event, ExitHandler, ExitPolicy,
    Facade, FacadeBuilder, Level, LogKind, LogMessage, LoggerError, Result, Sink, SinkKind,
    Termination, TimestampFormat,
};
pub use sinks::{
    CapturedMessage, ChannelSink, ConsoleSink, FileSink, MemorySink, PipelineMode, PipelineSink,
};
