//! In-memory sink for tests
//!
//! Captures every call without rendering decorations, so assertions can
//! look at exactly what the facade forwarded.

use super::text::Decorations;
use crate::core::{Event, LogKind, Result, Sink, SinkKind};
use parking_lot::Mutex;
use std::any::Any;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedMessage {
    pub message: String,
    pub level: LogKind,
    /// Empty when the call carried no icon
    pub icon: String,
    pub is_task: bool,
    pub is_complete: bool,
}

/// # Example
///
/// ```
/// use rust_fanout_logger::{Facade, LogKind, MemorySink};
///
/// let facade = Facade::builder().sink(MemorySink::new()).build();
/// facade.info(format_args!("hello {}", "world"));
///
/// let last = facade.with_sink(|sink: &MemorySink| sink.last()).flatten();
/// assert_eq!(last.map(|m| m.level), Some(LogKind::Info));
/// ```
#[derive(Default)]
pub struct MemorySink {
    decorations: Decorations,
    messages: Mutex<Vec<CapturedMessage>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<CapturedMessage> {
        self.messages.lock().clone()
    }

    pub fn last(&self) -> Option<CapturedMessage> {
        self.messages.lock().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.messages.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().is_empty()
    }

    pub fn clear(&self) {
        self.messages.lock().clear();
    }

    pub fn icons_enabled(&self) -> bool {
        self.decorations.icons()
    }

    pub fn correlation_id_enabled(&self) -> bool {
        self.decorations.correlation_id()
    }
}

impl Sink for MemorySink {
    fn kind(&self) -> SinkKind {
        SinkKind::Memory
    }

    fn init(&self) -> Box<dyn Sink> {
        Box::new(Self::new())
    }

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
        let captured = CapturedMessage {
            message: event.message(),
            level: event.kind,
            icon: event.icon.to_string(),
            is_task: event.is_task,
            is_complete: event.is_complete,
        };
        self.messages.lock().push(captured);
        Ok(())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
