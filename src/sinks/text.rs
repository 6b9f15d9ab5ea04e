//! Line rendering shared by the console and pipeline sinks

use crate::core::color::RESET;
use crate::core::{config, Event, LogKind, LoggerError, Result, TimestampFormat};
use colored::{Color, Colorize};
use parking_lot::Mutex;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Output handle shared between a prototype sink and the instances built from it
pub type SharedWriter = Arc<Mutex<Box<dyn Write + Send>>>;

pub(crate) fn stdout_writer() -> SharedWriter {
    Arc::new(Mutex::new(Box::new(io::stdout())))
}

/// Per-sink decoration flags
///
/// Setters take `&self` so the facade can toggle flags on sinks it only
/// holds behind `Arc<dyn Sink>`.
#[derive(Debug, Default)]
pub(crate) struct Decorations {
    timestamp: AtomicBool,
    correlation_id: AtomicBool,
    icons: AtomicBool,
}

impl Decorations {
    pub fn set_timestamp(&self, value: bool) {
        self.timestamp.store(value, Ordering::Relaxed);
    }

    pub fn set_correlation_id(&self, value: bool) {
        self.correlation_id.store(value, Ordering::Relaxed);
    }

    pub fn set_icons(&self, value: bool) {
        self.icons.store(value, Ordering::Relaxed);
    }

    pub fn timestamp(&self) -> bool {
        self.timestamp.load(Ordering::Relaxed)
    }

    pub fn correlation_id(&self) -> bool {
        self.correlation_id.load(Ordering::Relaxed)
    }

    pub fn icons(&self) -> bool {
        self.icons.load(Ordering::Relaxed)
    }
}

/// Whether a text sink writes build-agent logging commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PipelineMode {
    /// Pipeline output when `AGENT_ID` is set, checked on every line
    #[default]
    Detect,
    Always,
    Never,
}

impl PipelineMode {
    pub fn is_active(&self) -> bool {
        match self {
            PipelineMode::Detect => config::is_pipeline(),
            PipelineMode::Always => true,
            PipelineMode::Never => false,
        }
    }
}

/// Placement of the decorations in front of the message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PrefixOrder {
    /// `<icon> <timestamp> [<correlation>] <message>`
    IconFirst,
    /// `<timestamp> [<correlation>] <icon> <message>`
    TimestampFirst,
}

/// Line color for each record kind
pub fn line_color(kind: LogKind) -> Color {
    match kind {
        LogKind::Success => Color::Green,
        LogKind::Info => Color::BrightWhite,
        LogKind::Notice => Color::BrightCyan,
        LogKind::Warn => Color::Yellow,
        LogKind::Error => Color::Red,
        LogKind::Debug => Color::Magenta,
        LogKind::Trace => Color::BrightMagenta,
        LogKind::Command => Color::Blue,
        LogKind::Disabled => Color::BrightBlack,
    }
}

fn escape(color: Color) -> String {
    format!("\x1b[{}m", color.to_fg_str())
}

/// Text output state common to [`ConsoleSink`](super::ConsoleSink) and
/// [`PipelineSink`](super::PipelineSink)
pub(crate) struct TextOutput {
    pub decorations: Decorations,
    pub writer: SharedWriter,
    pub use_colors: bool,
    pub pipeline_mode: PipelineMode,
    pub timestamp_format: TimestampFormat,
    pub order: PrefixOrder,
}

impl TextOutput {
    pub fn new(order: PrefixOrder, pipeline_mode: PipelineMode) -> Self {
        Self {
            decorations: Decorations::default(),
            writer: stdout_writer(),
            use_colors: true,
            pipeline_mode,
            timestamp_format: TimestampFormat::default(),
            order,
        }
    }

    /// Same construction parameters, cleared decoration flags
    pub fn fresh(&self) -> Self {
        Self {
            decorations: Decorations::default(),
            writer: Arc::clone(&self.writer),
            use_colors: self.use_colors,
            pipeline_mode: self.pipeline_mode,
            timestamp_format: self.timestamp_format.clone(),
            order: self.order,
        }
    }

    pub fn write_event(&self, event: &Event<'_>, sink_name: &str) -> Result<()> {
        let output = self.render(event, self.pipeline_mode.is_active());
        let mut writer = self.writer.lock();
        writer.write_all(output.as_bytes()).map_err(|e| {
            LoggerError::io_operation(
                format!("writing to {} sink", sink_name),
                "line dropped",
                e,
            )
        })
    }

    pub fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    /// Full output for one event, trailing newline included
    pub fn render(&self, event: &Event<'_>, pipeline: bool) -> String {
        let color = line_color(event.kind);
        let is_issue =
            pipeline && event.is_task && matches!(event.kind, LogKind::Warn | LogKind::Error);

        // highlighted words end in a reset; switch back to the line color
        let resume = if pipeline {
            (!is_issue).then(|| escape(color))
        } else if self.colorize() {
            Some(escape(color))
        } else {
            None
        };

        let line = self.decorate(event, &event.body.render(resume.as_deref()));
        if pipeline {
            render_pipeline(event, color, &line)
        } else {
            self.render_terminal(event, color, &line)
        }
    }

    fn colorize(&self) -> bool {
        self.use_colors && colored::control::SHOULD_COLORIZE.should_colorize()
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn decorate(&self, event: &Event<'_>, text: &str) -> String {
        let icon = (self.decorations.icons() && !event.icon.is_empty()).then_some(event.icon);
        let correlation = if self.decorations.correlation_id() {
            config::correlation_id()
        } else {
            None
        };
        let timestamp = self
            .decorations
            .timestamp()
            .then(|| self.timestamp_format.now());

        let mut line = String::with_capacity(text.len() + 48);
        if self.order == PrefixOrder::IconFirst {
            push_word(&mut line, icon);
        }
        push_word(&mut line, timestamp.as_deref());
        if let Some(id) = correlation {
            line.push('[');
            line.push_str(&id);
            line.push_str("] ");
        }
        if self.order == PrefixOrder::TimestampFirst {
            push_word(&mut line, icon);
        }
        line.push_str(text);
        line
    }

    fn render_terminal(&self, event: &Event<'_>, color: Color, line: &str) -> String {
        let mut out = self.paint(line, color);
        out.push('\n');
        if event.is_complete {
            let closing = match event.kind {
                LogKind::Success => Some("Completed"),
                LogKind::Error => Some("Failed"),
                _ => None,
            };
            if let Some(closing) = closing {
                out.push_str(&self.paint(closing, color));
                out.push('\n');
            }
        }
        out
    }
}

fn push_word(line: &mut String, word: Option<&str>) {
    if let Some(word) = word {
        line.push_str(word);
        line.push(' ');
    }
}

/// Build-agent logging commands
fn render_pipeline(event: &Event<'_>, color: Color, line: &str) -> String {
    let esc = escape(color);
    let mut out = String::with_capacity(line.len() + 64);

    match event.kind {
        LogKind::Success => {
            out.push_str(&format!("##[section]{}{}{}\n", esc, line, RESET));
            if event.is_complete {
                if event.is_task {
                    out.push_str(&format!("{}##vso[task.complete result=Succeeded;]\n", esc));
                    out.push_str(&format!("{}##[section] Completed\n", esc));
                } else {
                    out.push_str(&format!("{}Completed{}\n", esc, RESET));
                }
            }
        }
        LogKind::Warn | LogKind::Error if event.is_task => {
            let issue = if event.kind == LogKind::Warn {
                "warning"
            } else {
                "error"
            };
            out.push_str(&format!("##vso[task.LogIssue type={};]{}\n", issue, line));
            if event.is_complete && event.kind == LogKind::Error {
                out.push_str("##vso[task.complete result=Failed;]\n");
            }
        }
        LogKind::Command => {
            out.push_str(&format!("##[command]{}{}{}\n", esc, line, RESET));
        }
        _ => {
            out.push_str(&format!("{}{}{}\n", esc, line, RESET));
            if event.is_complete && event.kind == LogKind::Error {
                out.push_str(&format!("{}Failed{}\n", esc, RESET));
            }
        }
    }
    out
}
