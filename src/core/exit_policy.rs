//! What the facade does after a fatal call or a completed task
//!
//! Fatal calls log first and then stop the caller. How they stop is up to
//! the host application: unwind, exit the process, or get an `Err` back.

use super::error::{LoggerError, Result};
use std::fmt;
use std::sync::Arc;

/// Reason the facade wants the caller to stop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Termination {
    /// `fatal` / `fatal_error` with the error text
    Fatal(String),
    /// A task reported successful completion
    TaskSucceeded,
    /// A task reported failed completion
    TaskFailed,
}

impl Termination {
    pub fn exit_code(&self) -> i32 {
        match self {
            Termination::TaskSucceeded => 0,
            Termination::Fatal(_) | Termination::TaskFailed => 1,
        }
    }

    pub fn into_error(self) -> LoggerError {
        match self {
            Termination::Fatal(message) => LoggerError::fatal(message),
            other => LoggerError::terminated(other.exit_code()),
        }
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Fatal(message) => write!(f, "fatal: {}", message),
            Termination::TaskSucceeded => write!(f, "task succeeded"),
            Termination::TaskFailed => write!(f, "task failed"),
        }
    }
}

/// Callback invoked by [`ExitPolicy::Handler`]
pub type ExitHandler = Arc<dyn Fn(&Termination) + Send + Sync>;

/// # Example
///
/// ```
/// use rust_fanout_logger::{ExitPolicy, Facade, MemorySink};
///
/// let facade = Facade::builder()
///     .sink(MemorySink::new())
///     .exit_policy(ExitPolicy::Propagate)
///     .build();
///
/// let err = std::io::Error::new(std::io::ErrorKind::Other, "disk gone");
/// assert!(facade.fatal_error(Some(&err), format_args!("cannot continue")).is_err());
/// ```
#[derive(Clone, Default)]
pub enum ExitPolicy {
    /// Fatal calls panic with the error text; completed tasks exit the
    /// process with their exit code
    #[default]
    Panic,

    /// Every termination exits the process with its exit code
    Exit,

    /// Return the termination to the caller as `Err`
    Propagate,

    /// Invoke the callback, then return `Err` like `Propagate`
    Handler(ExitHandler),
}

impl ExitPolicy {
    pub fn apply(&self, termination: Termination) -> Result<()> {
        match self {
            ExitPolicy::Panic => match termination {
                Termination::Fatal(message) => panic!("{}", message),
                other => std::process::exit(other.exit_code()),
            },
            ExitPolicy::Exit => std::process::exit(termination.exit_code()),
            ExitPolicy::Propagate => Err(termination.into_error()),
            ExitPolicy::Handler(handler) => {
                handler(&termination);
                Err(termination.into_error())
            }
        }
    }
}

impl fmt::Debug for ExitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl fmt::Display for ExitPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitPolicy::Panic => write!(f, "Panic"),
            ExitPolicy::Exit => write!(f, "Exit"),
            ExitPolicy::Propagate => write!(f, "Propagate"),
            ExitPolicy::Handler(_) => write!(f, "Handler"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Termination::TaskSucceeded.exit_code(), 0);
        assert_eq!(Termination::TaskFailed.exit_code(), 1);
        assert_eq!(Termination::Fatal("x".into()).exit_code(), 1);
    }

    #[test]
    fn test_propagate() {
        let err = ExitPolicy::Propagate
            .apply(Termination::Fatal("disk gone".into()))
            .unwrap_err();
        assert!(matches!(err, LoggerError::Fatal { ref message } if message == "disk gone"));

        let err = ExitPolicy::Propagate
            .apply(Termination::TaskSucceeded)
            .unwrap_err();
        assert!(matches!(err, LoggerError::Terminated { code: 0 }));
    }

    #[test]
    fn test_handler_sees_termination() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let seen_clone = Arc::clone(&seen);
        let policy = ExitPolicy::Handler(Arc::new(move |t: &Termination| {
            seen_clone.lock().push(t.clone());
        }));

        assert!(policy.apply(Termination::TaskFailed).is_err());
        assert_eq!(*seen.lock(), vec![Termination::TaskFailed]);
    }

    #[test]
    #[should_panic(expected = "boom")]
    fn test_panic_on_fatal() {
        let _ = ExitPolicy::Panic.apply(Termination::Fatal("boom".into()));
    }

    #[test]
    fn test_display() {
        assert_eq!(ExitPolicy::default().to_string(), "Panic");
        assert_eq!(ExitPolicy::Propagate.to_string(), "Propagate");
        assert_eq!(Termination::TaskFailed.to_string(), "task failed");
    }
}
