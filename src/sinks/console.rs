//! Console sink implementation

use super::text::{PipelineMode, PrefixOrder, TextOutput};
use crate::core::{Event, Result, Sink, SinkKind, TimestampFormat};
use parking_lot::Mutex;
use std::any::Any;
use std::io::Write;
use std::sync::Arc;

/// Colored terminal output on stdout
///
/// Switches to build-agent logging commands when `AGENT_ID` is set.
/// Decorations are written as `<icon> <timestamp> [<correlation>] <message>`.
pub struct ConsoleSink {
    output: TextOutput,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            output: TextOutput::new(PrefixOrder::IconFirst, PipelineMode::Detect),
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self::new().colors(use_colors)
    }

    #[must_use]
    pub fn colors(mut self, use_colors: bool) -> Self {
        self.output.use_colors = use_colors;
        self
    }

    /// Write somewhere other than stdout
    ///
    /// Instances created by [`Sink::init`] share the same writer.
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

    /// # Examples
    ///
    /// ```
    /// use rust_fanout_logger::sinks::ConsoleSink;
    /// use rust_fanout_logger::TimestampFormat;
    ///
    /// let sink = ConsoleSink::new().with_timestamp_format(TimestampFormat::Iso8601Millis);
    /// ```
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        self.output.timestamp_format = format;
        self
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Console
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
        self.output.write_event(event, "console")
    }

    fn flush(&self) -> Result<()> {
        self.output.flush()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::icon;
    use std::io;

    #[derive(Clone, Default)]
    struct Buffer(Arc<Mutex<Vec<u8>>>);

    impl Write for Buffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Buffer {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock()).into_owned()
        }
    }

    fn plain_sink(buffer: &Buffer) -> ConsoleSink {
        ConsoleSink::with_colors(false)
            .with_pipeline_mode(PipelineMode::Never)
            .with_writer(buffer.clone())
    }

    #[test]
    fn test_console_sink_writes_lines() {
        let buffer = Buffer::default();
        let sink = plain_sink(&buffer);

        sink.info(format_args!("hello {}", "world")).unwrap();
        sink.warn(format_args!("careful")).unwrap();

        assert_eq!(buffer.contents(), "hello world\ncareful\n");
    }

    #[test]
    fn test_console_sink_icons() {
        let buffer = Buffer::default();
        let sink = plain_sink(&buffer);
        sink.use_icons(true);

        sink.command(format_args!("cargo build")).unwrap();
        assert_eq!(buffer.contents(), format!("{} cargo build\n", icon::WRENCH));
    }

    #[test]
    fn test_init_shares_writer_and_resets_flags() {
        let buffer = Buffer::default();
        let prototype = plain_sink(&buffer);
        prototype.use_timestamp(true);

        let sink = prototype.init();
        assert!(!sink.is_timestamp_enabled());
        assert_eq!(sink.kind(), SinkKind::Console);

        sink.notice(format_args!("from init")).unwrap();
        assert_eq!(buffer.contents(), "from init\n");
    }

    #[test]
    fn test_fatal_prints_failed() {
        let buffer = Buffer::default();
        let sink = plain_sink(&buffer);

        sink.fatal(format_args!("out of disk")).unwrap();
        assert_eq!(buffer.contents(), "out of disk\nFailed\n");
    }
}
