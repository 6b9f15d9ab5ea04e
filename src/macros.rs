//! Logging macros for ergonomic message formatting.
//!
//! Each macro forwards `format_args!` to the matching [`Facade`](crate::Facade)
//! method, so nothing is formatted when the level gate rejects the call.
//!
//! # Examples
//!
//! ```
//! use rust_fanout_logger::prelude::*;
//! use rust_fanout_logger::info;
//!
//! let facade = Facade::builder().sink(MemorySink::new()).build();
//!
//! info!(facade, "Server started");
//!
//! let port = 8080;
//! info!(facade, "Server listening on port {}", port);
//! ```

/// Log at an explicit level without an icon.
///
/// # Examples
///
/// ```
/// # use rust_fanout_logger::prelude::*;
/// # let facade = Facade::new();
/// use rust_fanout_logger::log;
/// log!(facade, Level::Info, "Simple message");
/// log!(facade, Level::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($facade:expr, $level:expr, $($arg:tt)+) => {
        $facade.log($level, format_args!($($arg)+))
    };
}

/// Log a trace-level message.
///
/// Sinks receive it as a debug record.
#[macro_export]
macro_rules! trace {
    ($facade:expr, $($arg:tt)+) => {
        $facade.trace(format_args!($($arg)+))
    };
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use rust_fanout_logger::prelude::*;
/// # let facade = Facade::new();
/// use rust_fanout_logger::debug;
/// debug!(facade, "Counter value: {}", 10);
/// ```
#[macro_export]
macro_rules! debug {
    ($facade:expr, $($arg:tt)+) => {
        $facade.debug(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! info {
    ($facade:expr, $($arg:tt)+) => {
        $facade.info(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! success {
    ($facade:expr, $($arg:tt)+) => {
        $facade.success(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! notice {
    ($facade:expr, $($arg:tt)+) => {
        $facade.notice(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! command {
    ($facade:expr, $($arg:tt)+) => {
        $facade.command(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! disabled {
    ($facade:expr, $($arg:tt)+) => {
        $facade.disabled(format_args!($($arg)+))
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use rust_fanout_logger::prelude::*;
/// # let facade = Facade::new();
/// use rust_fanout_logger::warn;
/// warn!(facade, "Retry attempt {} of {}", 3, 5);
/// ```
#[macro_export]
macro_rules! warn {
    ($facade:expr, $($arg:tt)+) => {
        $facade.warn(format_args!($($arg)+))
    };
}

#[macro_export]
macro_rules! error {
    ($facade:expr, $($arg:tt)+) => {
        $facade.error(format_args!($($arg)+))
    };
}

/// Log at error level, then apply the facade's exit policy.
///
/// Evaluates to the `Result` returned by [`Facade::fatal`](crate::Facade::fatal).
///
/// # Examples
///
/// ```
/// # use rust_fanout_logger::prelude::*;
/// use rust_fanout_logger::fatal;
/// let facade = Facade::builder().exit_policy(ExitPolicy::Propagate).build();
/// assert!(fatal!(facade, "Unable to recover: {}", "disk full").is_err());
/// ```
#[macro_export]
macro_rules! fatal {
    ($facade:expr, $($arg:tt)+) => {
        $facade.fatal(format_args!($($arg)+))
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{Facade, Level, LogKind};
    use crate::sinks::MemorySink;

    fn facade() -> Facade {
        Facade::builder()
            .level(Level::Trace)
            .sink(MemorySink::new())
            .build()
    }

    fn kinds(facade: &Facade) -> Vec<LogKind> {
        facade
            .with_sink(|sink: &MemorySink| sink.messages().into_iter().map(|m| m.level).collect())
            .unwrap_or_default()
    }

    #[test]
    fn test_level_macros() {
        let facade = facade();
        log!(facade, Level::Info, "Formatted: {}", 42);
        trace!(facade, "Trace message");
        debug!(facade, "Count: {}", 5);
        info!(facade, "Items: {}", 100);
        warn!(facade, "Retry {} of {}", 1, 3);
        error!(facade, "Code: {}", 500);

        assert_eq!(
            kinds(&facade),
            vec![
                LogKind::Info,
                LogKind::Debug,
                LogKind::Debug,
                LogKind::Info,
                LogKind::Warn,
                LogKind::Error,
            ]
        );
    }

    #[test]
    fn test_presentation_macros() {
        let facade = facade();
        success!(facade, "Deployed {}", "v2");
        notice!(facade, "Heads up");
        command!(facade, "git {}", "pull");
        disabled!(facade, "Skipped");

        assert_eq!(
            kinds(&facade),
            vec![
                LogKind::Success,
                LogKind::Notice,
                LogKind::Command,
                LogKind::Disabled,
            ]
        );
        let last = facade.with_sink(|s: &MemorySink| s.last()).flatten();
        assert_eq!(last.map(|m| m.message), Some("Skipped".to_string()));
    }
}
