//! Core facade types and the sink contract

pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod exit_policy;
pub mod facade;
pub mod icon;
pub mod level;
mod listener;
pub mod message;
pub mod metrics;
pub mod sink;
pub mod timestamp;

pub use color::ColorCode;
pub use config::EnvConfig;
pub use error::{LoggerError, Result};
pub use event::{interpolate, Body, Event};
pub use exit_policy::{ExitHandler, ExitPolicy, Termination};
pub use facade::{Facade, FacadeBuilder};
pub use level::Level;
pub use message::{LogKind, LogMessage};
pub use metrics::DeliveryMetrics;
pub use sink::{Sink, SinkKind};
pub use timestamp::TimestampFormat;
