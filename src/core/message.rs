//! Structured log record delivered to channel subscribers

use super::error::Result;
use super::icon;
use super::level::Level;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Label attached to every emitted record
///
/// This is wider than [`Level`]: `success`, `command`, `disabled` and
/// `notice` are presentation kinds that all gate at [`Level::Info`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Success,
    Command,
    Disabled,
    Notice,
}

impl LogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Error => "error",
            LogKind::Warn => "warn",
            LogKind::Info => "info",
            LogKind::Debug => "debug",
            LogKind::Trace => "trace",
            LogKind::Success => "success",
            LogKind::Command => "command",
            LogKind::Disabled => "disabled",
            LogKind::Notice => "notice",
        }
    }

    /// Icon used by the named emission methods (`info`, `warn`, ...)
    pub fn default_icon(&self) -> &'static str {
        match self {
            LogKind::Error => icon::REVOLVING_LIGHT,
            LogKind::Warn => icon::WARNING,
            LogKind::Info => icon::INFO,
            LogKind::Debug => icon::FIRE,
            LogKind::Trace => icon::BULB,
            LogKind::Success => icon::THUMBS_UP,
            LogKind::Command => icon::WRENCH,
            LogKind::Disabled => icon::BLACK_SQUARE,
            LogKind::Notice => icon::FLAG,
        }
    }
}

impl From<Level> for LogKind {
    fn from(level: Level) -> Self {
        match level {
            Level::Error => LogKind::Error,
            Level::Warning => LogKind::Warn,
            Level::Info => LogKind::Info,
            Level::Debug => LogKind::Debug,
            Level::Trace => LogKind::Trace,
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One log event as seen by a subscriber
///
/// Records are built once per emission and cloned into every matching
/// subscriber channel; nothing is shared after construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogMessage {
    pub level: LogKind,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub icon: String,
    pub is_task: bool,
}

impl LogMessage {
    pub fn new(level: LogKind, message: impl Into<String>, icon: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            timestamp: Utc::now(),
            icon: icon.into(),
            is_task: false,
        }
    }

    pub fn with_timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_task(mut self, is_task: bool) -> Self {
        self.is_task = is_task;
        self
    }

    /// Human readable form: `[<rfc3339>] <icon> <level>: <message>`
    pub fn render(&self) -> String {
        self.to_string()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl fmt::Display for LogMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timestamp = self.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
        if self.icon.is_empty() {
            write!(f, "[{}] {}: {}", timestamp, self.level, self.message)
        } else {
            write!(
                f,
                "[{}] {} {}: {}",
                timestamp, self.icon, self.level, self.message
            )
        }
    }
}
