//! Sink implementations

pub mod channel;
pub mod console;
pub mod file;
pub mod memory;
pub mod pipeline;
mod text;

pub use channel::{ChannelSink, Filter, Subscription, SUBSCRIBER_CAPACITY};
pub use console::ConsoleSink;
pub use file::FileSink;
pub use memory::{CapturedMessage, MemorySink};
pub use pipeline::PipelineSink;
pub use text::{line_color, PipelineMode, SharedWriter};

// Re-export the contract for sink implementors
pub use crate::core::{Event, Sink, SinkKind};
