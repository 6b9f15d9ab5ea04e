//! Dispatch facade
//!
//! One call on the facade is checked against the level threshold and then
//! forwarded to every registered sink in registration order. A failing or
//! panicking sink is reported on stderr and never stops the others.

use super::{
    color::ColorCode,
    config::EnvConfig,
    error::{LoggerError, Result},
    exit_policy::{ExitPolicy, Termination},
    level::Level,
    listener::{self, panic_message},
    message::LogMessage,
    sink::{Sink, SinkKind},
};
use crate::sinks::{ChannelSink, ConsoleSink};
use parking_lot::RwLock;
use std::error::Error;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

static INSTANCE: RwLock<Option<Arc<Facade>>> = parking_lot::const_rwlock(None);

pub struct Facade {
    sinks: RwLock<Vec<Arc<dyn Sink>>>,
    level: AtomicU8,
    highlight_color: RwLock<ColorCode>,
    use_timestamp: AtomicBool,
    use_correlation_id: AtomicBool,
    use_icons: AtomicBool,
    exit_policy: RwLock<ExitPolicy>,
}

impl Facade {
    /// Empty facade: no sinks, level `Info`, every decoration off
    #[must_use]
    pub fn new() -> Self {
        Self {
            sinks: RwLock::new(Vec::new()),
            level: AtomicU8::new(Level::Info as u8),
            highlight_color: RwLock::new(ColorCode::default()),
            use_timestamp: AtomicBool::new(false),
            use_correlation_id: AtomicBool::new(false),
            use_icons: AtomicBool::new(false),
            exit_policy: RwLock::new(ExitPolicy::default()),
        }
    }

    /// Create a builder for configuring a facade
    ///
    /// # Example
    ///
    /// ```
    /// use rust_fanout_logger::prelude::*;
    ///
    /// let facade = Facade::builder()
    ///     .level(Level::Debug)
    ///     .sink(ChannelSink::new())
    ///     .icons(true)
    ///     .build();
    ///
    /// assert_eq!(facade.sink_kinds(), vec![SinkKind::Channel]);
    /// ```
    pub fn builder() -> FacadeBuilder {
        FacadeBuilder::new()
    }

    /// Process-wide facade, created on first use
    ///
    /// The default instance logs to the console at `Info`, or at the level
    /// named by `LOG_LEVEL` when that is `debug` or `trace`.
    pub fn get_instance() -> Arc<Facade> {
        if let Some(facade) = INSTANCE.read().as_ref() {
            return Arc::clone(facade);
        }

        let mut slot = INSTANCE.write();
        let facade = slot.get_or_insert_with(|| {
            Arc::new(
                Facade::builder()
                    .env_config(&EnvConfig::from_env())
                    .sink(ConsoleSink::new())
                    .build(),
            )
        });
        Arc::clone(facade)
    }

    /// Drop the process-wide facade; the next `get_instance` builds a new one
    ///
    /// Handles obtained earlier keep working on the old instance.
    pub fn reset_instance() {
        INSTANCE.write().take();
    }

    /// Add a sink built from `prototype`
    ///
    /// At most one sink per [`SinkKind`] is kept; registering a second one
    /// is a no-op that returns false. The new sink receives the facade's
    /// current decoration flags.
    pub fn register(&self, prototype: &dyn Sink) -> bool {
        let kind = prototype.kind();
        let mut sinks = self.sinks.write();
        if sinks.iter().any(|sink| sink.kind() == kind) {
            return false;
        }

        let sink: Arc<dyn Sink> = Arc::from(prototype.init());
        sink.use_timestamp(self.use_timestamp.load(Ordering::Relaxed));
        sink.use_correlation_id(self.use_correlation_id.load(Ordering::Relaxed));
        sink.use_icons(self.use_icons.load(Ordering::Relaxed));
        sinks.push(sink);
        true
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.read().len()
    }

    /// Registered kinds in fan-out order
    pub fn sink_kinds(&self) -> Vec<SinkKind> {
        self.sinks.read().iter().map(|sink| sink.kind()).collect()
    }

    /// Run `f` on the first registered sink of type `T`
    pub fn with_sink<T, R>(&self, f: impl FnOnce(&T) -> R) -> Option<R>
    where
        T: Sink,
    {
        let sinks = self.sinks.read();
        let sink = sinks
            .iter()
            .find_map(|sink| sink.as_any().downcast_ref::<T>())?;
        Some(f(sink))
    }

    /// Flush every sink, even after one fails; returns the first failure
    pub fn flush(&self) -> Result<()> {
        match self.fan_out("flush", |sink| sink.flush()) {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    // Configuration

    pub fn level(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Relaxed))
    }

    pub fn with_level(&self, level: Level) -> &Self {
        self.level.store(level as u8, Ordering::Relaxed);
        self
    }

    pub fn with_debug(&self) -> &Self {
        self.with_level(Level::Debug)
    }

    pub fn with_trace(&self) -> &Self {
        self.with_level(Level::Trace)
    }

    pub fn with_warning(&self) -> &Self {
        self.with_level(Level::Warning)
    }

    pub fn highlight_color(&self) -> ColorCode {
        *self.highlight_color.read()
    }

    pub fn with_highlight_color(&self, color: ColorCode) -> &Self {
        *self.highlight_color.write() = color;
        self
    }

    pub fn set_exit_policy(&self, policy: ExitPolicy) -> &Self {
        *self.exit_policy.write() = policy;
        self
    }

    pub fn is_timestamp_enabled(&self) -> bool {
        self.use_timestamp.load(Ordering::Relaxed)
    }

    pub fn with_timestamp(&self) -> &Self {
        self.enable_timestamp(true)
    }

    /// Flip the timestamp flag and push the new value to every sink
    pub fn toggle_timestamp(&self) -> &Self {
        self.enable_timestamp(!self.is_timestamp_enabled())
    }

    pub fn enable_timestamp(&self, value: bool) -> &Self {
        self.use_timestamp.store(value, Ordering::Relaxed);
        for sink in self.sinks.read().iter() {
            sink.use_timestamp(value);
        }
        self
    }

    pub fn with_correlation_id(&self) -> &Self {
        self.use_correlation_id.store(true, Ordering::Relaxed);
        for sink in self.sinks.read().iter() {
            sink.use_correlation_id(true);
        }
        self
    }

    pub fn with_icons(&self) -> &Self {
        self.use_icons.store(true, Ordering::Relaxed);
        for sink in self.sinks.read().iter() {
            sink.use_icons(true);
        }
        self
    }

    // Emission

    #[inline]
    fn enabled(&self, level: Level) -> bool {
        self.level().allows(level)
    }

    /// Call `op` on every sink, isolating errors and panics per sink
    fn dispatch<F>(&self, operation: &str, op: F)
    where
        F: Fn(&dyn Sink) -> Result<()>,
    {
        self.fan_out(operation, op);
    }

    /// Like `dispatch`, keeping the first error a sink returned
    fn fan_out<F>(&self, operation: &str, op: F) -> Option<LoggerError>
    where
        F: Fn(&dyn Sink) -> Result<()>,
    {
        let mut first_error = None;
        let sinks = self.sinks.read();
        for sink in sinks.iter() {
            match catch_unwind(AssertUnwindSafe(|| op(sink.as_ref()))) {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    eprintln!(
                        "[LOGGER ERROR] Sink '{}' failed during {}: {}",
                        sink.name(),
                        operation,
                        e
                    );
                    first_error.get_or_insert(e);
                }
                Err(payload) => {
                    eprintln!(
                        "[LOGGER CRITICAL] Sink '{}' panicked during {}: {}. \
                         Other sinks continue to function.",
                        sink.name(),
                        operation,
                        panic_message(payload.as_ref())
                    );
                }
            }
        }
        first_error
    }

    fn terminate(&self, termination: Termination) -> Result<()> {
        let policy = self.exit_policy.read().clone();
        policy.apply(termination)
    }

    /// Emit at `level` without an icon
    pub fn log(&self, level: Level, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            self.dispatch("log", |sink| sink.log(level, args));
        }
    }

    pub fn log_icon(&self, icon: &str, level: Level, args: fmt::Arguments<'_>) {
        if self.enabled(level) {
            self.dispatch("log_icon", |sink| sink.log_icon(icon, level, args));
        }
    }

    /// Fill `{}` placeholders in `template` with `words`, each painted in
    /// the facade's highlight color
    pub fn log_highlight(&self, template: &str, level: Level, words: &[&dyn fmt::Display]) {
        if self.enabled(level) {
            let color = self.highlight_color();
            self.dispatch("log_highlight", |sink| {
                sink.log_highlight(template, level, color, words)
            });
        }
    }

    pub fn info(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::Info) {
            self.dispatch("info", |sink| sink.info(args));
        }
    }

    pub fn success(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::Info) {
            self.dispatch("success", |sink| sink.success(args));
        }
    }

    pub fn warn(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::Warning) {
            self.dispatch("warn", |sink| sink.warn(args));
        }
    }

    pub fn command(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::Info) {
            self.dispatch("command", |sink| sink.command(args));
        }
    }

    pub fn disabled(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::Info) {
            self.dispatch("disabled", |sink| sink.disabled(args));
        }
    }

    pub fn notice(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::Info) {
            self.dispatch("notice", |sink| sink.notice(args));
        }
    }

    pub fn debug(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::Debug) {
            self.dispatch("debug", |sink| sink.debug(args));
        }
    }

    /// Gated at `Trace`, but sinks receive a `debug` call
    pub fn trace(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::Trace) {
            self.dispatch("trace", |sink| sink.debug(args));
        }
    }

    pub fn error(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::Error) {
            self.dispatch("error", |sink| sink.error(args));
        }
    }

    pub fn exception(&self, err: &dyn Error, args: fmt::Arguments<'_>) {
        if self.enabled(Level::Error) {
            self.dispatch("exception", |sink| sink.exception(err, args));
        }
    }

    /// Emit the error's text at error level; `None` is ignored
    pub fn log_error(&self, err: Option<&dyn Error>) {
        let Some(err) = err else {
            return;
        };
        if self.enabled(Level::Error) {
            self.dispatch("log_error", |sink| sink.error(format_args!("{}", err)));
        }
    }

    /// Emit at error level, then stop according to the exit policy
    pub fn fatal(&self, args: fmt::Arguments<'_>) -> Result<()> {
        if self.enabled(Level::Error) {
            self.dispatch("fatal", |sink| sink.fatal(args));
        }
        self.terminate(Termination::Fatal(fmt::format(args)))
    }

    /// Emit at error level regardless of the threshold; stop according to
    /// the exit policy only when `err` is set
    pub fn fatal_error(&self, err: Option<&dyn Error>, args: fmt::Arguments<'_>) -> Result<()> {
        self.dispatch("fatal_error", |sink| sink.error(args));
        match err {
            Some(err) => self.terminate(Termination::Fatal(err.to_string())),
            None => Ok(()),
        }
    }

    /// Task progress at success level; `complete` ends the task with a
    /// successful result
    pub fn task_success(&self, args: fmt::Arguments<'_>, complete: bool) -> Result<()> {
        if self.enabled(Level::Info) {
            self.dispatch("task_success", |sink| sink.task_success(args, complete));
        }
        if complete {
            self.terminate(Termination::TaskSucceeded)
        } else {
            Ok(())
        }
    }

    pub fn task_warn(&self, args: fmt::Arguments<'_>) {
        if self.enabled(Level::Warning) {
            self.dispatch("task_warn", |sink| sink.task_warn(args));
        }
    }

    /// Task failure report; `complete` ends the task with a failed result
    pub fn task_error(&self, args: fmt::Arguments<'_>, complete: bool) -> Result<()> {
        if self.enabled(Level::Error) {
            self.dispatch("task_error", |sink| sink.task_error(args, complete));
        }
        if complete {
            self.terminate(Termination::TaskFailed)
        } else {
            Ok(())
        }
    }

    // Subscribers

    /// Run `callback` on a dedicated thread for every message the channel
    /// sink publishes
    ///
    /// Returns the subscription id (`"sub_" + id`), or an empty string when
    /// no [`ChannelSink`] is registered. An id that is already subscribed
    /// keeps its existing listener and `callback` is dropped.
    pub fn on_message<F>(&self, id: &str, callback: F) -> String
    where
        F: FnMut(LogMessage) + Send + 'static,
    {
        let Some(subscription) = self.with_sink(|channel: &ChannelSink| {
            channel.subscribe_detailed(id, Arc::new(|_: &LogMessage| true))
        }) else {
            return String::new();
        };

        if subscription.created {
            if let Err(e) = listener::spawn_thread(&subscription.id, subscription.receiver, callback)
            {
                eprintln!(
                    "[LOGGER ERROR] Failed to start listener '{}': {}",
                    subscription.id, e
                );
                self.remove_message_handler(&subscription.id);
                return String::new();
            }
        }
        subscription.id
    }

    /// Like [`on_message`](Self::on_message), awaiting `callback` on the
    /// tokio runtime behind `handle`
    #[cfg(feature = "async-listeners")]
    pub fn on_message_async<F, Fut>(
        &self,
        id: &str,
        handle: &tokio::runtime::Handle,
        callback: F,
    ) -> String
    where
        F: Fn(LogMessage) -> Fut + Send + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        let Some(subscription) = self.with_sink(|channel: &ChannelSink| {
            channel.subscribe_detailed(id, Arc::new(|_: &LogMessage| true))
        }) else {
            return String::new();
        };

        if subscription.created {
            listener::spawn_async(handle, &subscription.id, subscription.receiver, callback);
        }
        subscription.id
    }

    /// Unsubscribe a listener by the id `on_message` returned
    ///
    /// The listener finishes the messages already buffered and exits.
    pub fn remove_message_handler(&self, subscription_id: &str) -> bool {
        self.with_sink(|channel: &ChannelSink| channel.unsubscribe(subscription_id))
            .unwrap_or(false)
    }
}

impl Default for Facade {
    fn default() -> Self {
        Self::new()
    }
}

/// Builder for [`Facade`]
pub struct FacadeBuilder {
    level: Level,
    sinks: Vec<Box<dyn Sink>>,
    timestamp: bool,
    correlation_id: bool,
    icons: bool,
    highlight_color: ColorCode,
    exit_policy: ExitPolicy,
}

impl FacadeBuilder {
    pub fn new() -> Self {
        Self {
            level: Level::Info,
            sinks: Vec::new(),
            timestamp: false,
            correlation_id: false,
            icons: false,
            highlight_color: ColorCode::default(),
            exit_policy: ExitPolicy::default(),
        }
    }

    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Register a sink prototype; duplicates of a kind are ignored at build
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn timestamp(mut self, enabled: bool) -> Self {
        self.timestamp = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn correlation_id(mut self, enabled: bool) -> Self {
        self.correlation_id = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn icons(mut self, enabled: bool) -> Self {
        self.icons = enabled;
        self
    }

    #[must_use = "builder methods return a new value"]
    pub fn highlight_color(mut self, color: ColorCode) -> Self {
        self.highlight_color = color;
        self
    }

    /// Set what `fatal` and completed tasks do after logging
    ///
    /// # Example
    ///
    /// ```
    /// use rust_fanout_logger::prelude::*;
    /// use std::sync::Arc;
    ///
    /// let facade = Facade::builder()
    ///     .exit_policy(ExitPolicy::Handler(Arc::new(|t: &Termination| {
    ///         eprintln!("stopping with code {}", t.exit_code());
    ///     })))
    ///     .build();
    ///
    /// assert!(facade.task_error(format_args!("lint failed"), true).is_err());
    /// ```
    #[must_use = "builder methods return a new value"]
    pub fn exit_policy(mut self, policy: ExitPolicy) -> Self {
        self.exit_policy = policy;
        self
    }

    /// Apply environment settings
    #[must_use = "builder methods return a new value"]
    pub fn env_config(mut self, config: &EnvConfig) -> Self {
        if let Some(level) = config.level {
            self.level = level;
        }
        self
    }

    /// Apply `LOG_LEVEL` and friends from the process environment
    #[must_use = "builder methods return a new value"]
    pub fn from_env(self) -> Self {
        self.env_config(&EnvConfig::from_env())
    }

    pub fn build(self) -> Facade {
        let facade = Facade::new();
        facade.with_level(self.level);
        facade.with_highlight_color(self.highlight_color);
        facade.set_exit_policy(self.exit_policy);
        facade.enable_timestamp(self.timestamp);
        if self.correlation_id {
            facade.with_correlation_id();
        }
        if self.icons {
            facade.with_icons();
        }

        for sink in &self.sinks {
            facade.register(&**sink);
        }
        facade
    }
}

impl Default for FacadeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
