//! Sink trait for log output destinations
//!
//! A sink implements configuration, [`Sink::write`] and [`Sink::init`]; every
//! per-level emission method is provided on top of `write`.

use super::color::ColorCode;
use super::error::{LoggerError, Result};
use super::event::{Body, Event};
use super::icon;
use super::level::Level;
use super::message::LogKind;
use std::any::Any;
use std::error::Error;
use std::fmt;

/// Identity used by the facade to register at most one sink per kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    Console,
    Pipeline,
    File,
    Memory,
    Channel,
    /// Sinks defined outside this crate
    Custom(&'static str),
}

impl SinkKind {
    pub fn as_str(&self) -> &'static str {
        match *self {
            SinkKind::Console => "console",
            SinkKind::Pipeline => "pipeline",
            SinkKind::File => "file",
            SinkKind::Memory => "memory",
            SinkKind::Channel => "channel",
            SinkKind::Custom(name) => name,
        }
    }
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait Sink: Send + Sync + 'static {
    fn kind(&self) -> SinkKind;

    fn name(&self) -> &str {
        self.kind().as_str()
    }

    /// A fresh instance built from this one's construction parameters
    ///
    /// Runtime state (subscribers, captured messages, decoration flags) is
    /// never carried over.
    fn init(&self) -> Box<dyn Sink>;

    fn use_timestamp(&self, value: bool);
    fn use_correlation_id(&self, value: bool);
    fn use_icons(&self, value: bool);
    fn is_timestamp_enabled(&self) -> bool;

    fn write(&self, event: &Event<'_>) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn as_any(&self) -> &dyn Any;

    fn log(&self, level: Level, args: fmt::Arguments<'_>) -> Result<()> {
        self.write(&Event::new(level.into(), "", Body::Args(args)))
    }

    fn log_icon(&self, icon: &str, level: Level, args: fmt::Arguments<'_>) -> Result<()> {
        self.write(&Event::new(level.into(), icon, Body::Args(args)))
    }

    fn log_highlight(
        &self,
        template: &str,
        level: Level,
        color: ColorCode,
        words: &[&dyn fmt::Display],
    ) -> Result<()> {
        let body = Body::Highlight {
            template,
            words,
            color,
        };
        self.write(&Event::new(level.into(), "", body))
    }

    fn info(&self, args: fmt::Arguments<'_>) -> Result<()> {
        emit(self, LogKind::Info, args)
    }

    fn success(&self, args: fmt::Arguments<'_>) -> Result<()> {
        emit(self, LogKind::Success, args)
    }

    fn warn(&self, args: fmt::Arguments<'_>) -> Result<()> {
        emit(self, LogKind::Warn, args)
    }

    fn command(&self, args: fmt::Arguments<'_>) -> Result<()> {
        emit(self, LogKind::Command, args)
    }

    fn disabled(&self, args: fmt::Arguments<'_>) -> Result<()> {
        emit(self, LogKind::Disabled, args)
    }

    fn notice(&self, args: fmt::Arguments<'_>) -> Result<()> {
        emit(self, LogKind::Notice, args)
    }

    fn debug(&self, args: fmt::Arguments<'_>) -> Result<()> {
        emit(self, LogKind::Debug, args)
    }

    fn trace(&self, args: fmt::Arguments<'_>) -> Result<()> {
        emit(self, LogKind::Trace, args)
    }

    fn error(&self, args: fmt::Arguments<'_>) -> Result<()> {
        emit(self, LogKind::Error, args)
    }

    /// `"<args>, err <err>"`, or just the error text when `args` is empty
    fn exception(&self, err: &dyn Error, args: fmt::Arguments<'_>) -> Result<()> {
        let context = fmt::format(args);
        let text = if context.is_empty() {
            err.to_string()
        } else {
            format!("{}, err {}", context, err)
        };
        let event = Event::new(LogKind::Error, icon::REVOLVING_LIGHT, Body::Text(text.into()));
        self.write(&event)
    }

    fn log_error(&self, err: Option<&dyn Error>) -> Result<()> {
        match err {
            Some(err) => {
                let body = Body::Text(err.to_string().into());
                self.write(&Event::new(LogKind::Error, icon::REVOLVING_LIGHT, body))
            }
            None => Ok(()),
        }
    }

    fn fatal(&self, args: fmt::Arguments<'_>) -> Result<()> {
        let event = Event::new(LogKind::Error, icon::REVOLVING_LIGHT, Body::Args(args));
        self.write(&event.completing())
    }

    /// Emits at error level, then returns [`LoggerError::Fatal`] if `err` is set
    fn fatal_error(&self, err: Option<&dyn Error>, args: fmt::Arguments<'_>) -> Result<()> {
        self.error(args)?;
        match err {
            Some(err) => Err(LoggerError::fatal(err.to_string())),
            None => Ok(()),
        }
    }

    fn task_success(&self, args: fmt::Arguments<'_>, complete: bool) -> Result<()> {
        let event = Event::new(LogKind::Success, "", Body::Args(args));
        self.write(&event.task(complete))
    }

    fn task_warn(&self, args: fmt::Arguments<'_>) -> Result<()> {
        let event = Event::new(LogKind::Warn, "", Body::Args(args));
        self.write(&event.task(false))
    }

    fn task_error(&self, args: fmt::Arguments<'_>, complete: bool) -> Result<()> {
        let event = Event::new(LogKind::Error, "", Body::Args(args));
        self.write(&event.task(complete))
    }
}

fn emit<S: Sink + ?Sized>(sink: &S, kind: LogKind, args: fmt::Arguments<'_>) -> Result<()> {
    sink.write(&Event::new(kind, kind.default_icon(), Body::Args(args)))
}
