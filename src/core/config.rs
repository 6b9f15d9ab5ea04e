//! Environment-derived configuration
//!
//! Variables read by the crate:
//!
//! | Variable            | Effect                                               |
//! |---------------------|------------------------------------------------------|
//! | `LOG_LEVEL`         | `debug` / `trace` raise the default facade's level   |
//! | `CORRELATION_ID`    | prefixed to lines when correlation ids are enabled   |
//! | `MAX_LOG_FILE_SIZE` | file sink rotation threshold in bytes                |
//! | `AGENT_ID`          | when set, the pipeline sink emits pipeline commands  |

use super::error::Result;
use super::level::Level;
use std::env;

pub const LOG_LEVEL_ENV: &str = "LOG_LEVEL";
pub const CORRELATION_ID_ENV: &str = "CORRELATION_ID";
pub const MAX_LOG_FILE_SIZE_ENV: &str = "MAX_LOG_FILE_SIZE";
pub const AGENT_ID_ENV: &str = "AGENT_ID";

/// Rotation threshold when `MAX_LOG_FILE_SIZE` is unset (5 MiB)
pub const DEFAULT_MAX_LOG_FILE_SIZE: u64 = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    pub level: Option<Level>,
    pub max_file_size: u64,
    pub pipeline: bool,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            level: None,
            max_file_size: DEFAULT_MAX_LOG_FILE_SIZE,
            pipeline: false,
        }
    }
}

impl EnvConfig {
    /// Read the process environment
    ///
    /// Malformed values are reported on stderr and ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(LOG_LEVEL_ENV) {
            match parse_level(&raw) {
                Ok(level) => config.level = level,
                Err(e) => eprintln!("[LOGGER WARNING] Ignoring {}: {}", LOG_LEVEL_ENV, e),
            }
        }

        if let Some(raw) = lookup(MAX_LOG_FILE_SIZE_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(size) => config.max_file_size = size,
                Err(e) => eprintln!(
                    "[LOGGER WARNING] Ignoring {}='{}': {}",
                    MAX_LOG_FILE_SIZE_ENV, raw, e
                ),
            }
        }

        config.pipeline = lookup(AGENT_ID_ENV).is_some_and(|v| !v.is_empty());
        config
    }
}

/// `LOG_LEVEL` only ever raises verbosity: `debug` and `trace` are honored,
/// every other valid level leaves the default in place.
fn parse_level(raw: &str) -> Result<Option<Level>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    match raw.parse::<Level>()? {
        level @ (Level::Debug | Level::Trace) => Ok(Some(level)),
        _ => Ok(None),
    }
}

/// Current correlation id, if one is set and non-empty
pub fn correlation_id() -> Option<String> {
    env::var(CORRELATION_ID_ENV).ok().filter(|id| !id.is_empty())
}

/// Rotation threshold, read at each call so it can change at runtime
pub fn max_log_file_size() -> u64 {
    match env::var(MAX_LOG_FILE_SIZE_ENV) {
        Ok(raw) => raw.trim().parse().unwrap_or(DEFAULT_MAX_LOG_FILE_SIZE),
        Err(_) => DEFAULT_MAX_LOG_FILE_SIZE,
    }
}

pub fn is_pipeline() -> bool {
    env::var(AGENT_ID_ENV).is_ok_and(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EnvConfig::from_lookup(lookup(&[]));
        assert_eq!(config, EnvConfig::default());
        assert_eq!(config.max_file_size, 5 * 1024 * 1024);
    }

    #[test]
    fn test_log_level() {
        let config = EnvConfig::from_lookup(lookup(&[("LOG_LEVEL", "debug")]));
        assert_eq!(config.level, Some(Level::Debug));

        let config = EnvConfig::from_lookup(lookup(&[("LOG_LEVEL", "TRACE")]));
        assert_eq!(config.level, Some(Level::Trace));

        // Only debug and trace change the default
        let config = EnvConfig::from_lookup(lookup(&[("LOG_LEVEL", "error")]));
        assert_eq!(config.level, None);

        let config = EnvConfig::from_lookup(lookup(&[("LOG_LEVEL", "chatty")]));
        assert_eq!(config.level, None);
    }

    #[test]
    fn test_max_file_size() {
        let config = EnvConfig::from_lookup(lookup(&[("MAX_LOG_FILE_SIZE", "1024")]));
        assert_eq!(config.max_file_size, 1024);

        let config = EnvConfig::from_lookup(lookup(&[("MAX_LOG_FILE_SIZE", "big")]));
        assert_eq!(config.max_file_size, DEFAULT_MAX_LOG_FILE_SIZE);
    }

    #[test]
    fn test_pipeline_detection() {
        assert!(EnvConfig::from_lookup(lookup(&[("AGENT_ID", "agent-7")])).pipeline);
        assert!(!EnvConfig::from_lookup(lookup(&[("AGENT_ID", "")])).pipeline);
    }
}
