//! Severity level definitions
//!
//! Levels are ordered by verbosity: `Error < Warning < Info < Debug < Trace`.
//! A facade configured at level `L` lets a call at level `X` through when `L >= X`.

use super::error::LoggerError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Error = 0,
    Warning = 1,
    #[default]
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Error,
        Level::Warning,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Error => "error",
            Level::Warning => "warning",
            Level::Info => "info",
            Level::Debug => "debug",
            Level::Trace => "trace",
        }
    }

    /// Whether a threshold of `self` lets a call at `level` through
    #[inline]
    pub fn allows(&self, level: Level) -> bool {
        *self >= level
    }

    pub(crate) fn from_u8(value: u8) -> Level {
        match value {
            0 => Level::Error,
            1 => Level::Warning,
            2 => Level::Info,
            3 => Level::Debug,
            _ => Level::Trace,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(Level::Error),
            "warn" | "warning" => Ok(Level::Warning),
            "info" => Ok(Level::Info),
            "debug" => Ok(Level::Debug),
            "trace" => Ok(Level::Trace),
            _ => Err(LoggerError::config(
                "level",
                format!("Invalid log level: '{}'", s),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(Level::Error < Level::Warning);
        assert!(Level::Warning < Level::Info);
        assert!(Level::Info < Level::Debug);
        assert!(Level::Debug < Level::Trace);
    }

    #[test]
    fn test_allows_is_inclusive() {
        assert!(Level::Info.allows(Level::Info));
        assert!(Level::Info.allows(Level::Error));
        assert!(!Level::Info.allows(Level::Debug));
        assert!(Level::Trace.allows(Level::Debug));
        assert!(!Level::Error.allows(Level::Warning));
    }

    #[test]
    fn test_labels() {
        let labels: Vec<&str> = Level::ALL.iter().map(|l| l.as_str()).collect();
        assert_eq!(labels, vec!["error", "warning", "info", "debug", "trace"]);
        assert_eq!(Level::default(), Level::Info);
    }

    #[test]
    fn test_parse() {
        assert_eq!("DEBUG".parse::<Level>().unwrap(), Level::Debug);
        assert_eq!("warn".parse::<Level>().unwrap(), Level::Warning);
        assert_eq!(" trace ".parse::<Level>().unwrap(), Level::Trace);
        assert!("verbose".parse::<Level>().is_err());
    }

    #[test]
    fn test_from_u8_roundtrip() {
        for level in Level::ALL {
            assert_eq!(Level::from_u8(level as u8), level);
        }
    }
}
