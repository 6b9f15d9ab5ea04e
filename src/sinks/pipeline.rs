//! Build pipeline sink

use super::text::{PipelineMode, PrefixOrder, TextOutput};
use crate::core::{Event, Result, Sink, SinkKind, TimestampFormat};
use parking_lot::Mutex;
use std::any::Any;
use std::io::Write;
use std::sync::Arc;

/// Console output for build agents
///
/// When pipeline mode is active every line is a logging command the agent
/// understands: `##[section]` for success, `##[command]` for commands and
/// `##vso[task.LogIssue ...]` / `##vso[task.complete ...]` for tasks.
/// Decorations are written as `<timestamp> [<correlation>] <icon> <message>`.
///
/// # Example
///
/// ```
/// use rust_fanout_logger::sinks::{PipelineMode, PipelineSink};
/// use rust_fanout_logger::Sink;
///
/// let sink = PipelineSink::new().with_pipeline_mode(PipelineMode::Always);
/// sink.command(format_args!("cargo test")).unwrap();
/// ```
pub struct PipelineSink {
    output: TextOutput,
}

impl PipelineSink {
    pub fn new() -> Self {
        Self {
            output: TextOutput::new(PrefixOrder::TimestampFirst, PipelineMode::Detect),
        }
    }

    #[must_use]
    pub fn colors(mut self, use_colors: bool) -> Self {
        self.output.use_colors = use_colors;
        self
    }

    #[must_use]
    pub fn with_writer<W: Write + Send + 'static>(mut self, writer: W) -> Self {
        self.output.writer = Arc::new(Mutex::new(Box::new(writer)));
        self
    }

    #[must_use]
    pub fn with_pipeline_mode(mut self, mode: PipelineMode) -> Self {
        self.output.pipeline_mode = mode;
        self
    }

    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.output.timestamp_format = format;
        self
    }
}

impl Default for PipelineSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for PipelineSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Pipeline
    }

    fn init(&self) -> Box<dyn Sink> {
        Box::new(Self {
            output: self.output.fresh(),
        })
    }

    fn use_timestamp(&self, value: bool) {
        self.output.decorations.set_timestamp(value);
    }

    fn use_correlation_id(&self, value: bool) {
        self.output.decorations.set_correlation_id(value);
    }

    fn use_icons(&self, value: bool) {
        self.output.decorations.set_icons(value);
    }

    fn is_timestamp_enabled(&self) -> bool {
        self.output.decorations.timestamp()
    }

    fn write(&self, event: &Event<'_>) -> Result<()> {
        self.output.write_event(event, "pipeline")
    }

    fn flush(&self) -> Result<()> {
        self.output.flush()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}
