//! # Runlog
//!
//! Training-run metric logging hooks.
//!
//! Provides:
//! - `MetricLoggerHook` - a runner lifecycle hook that forwards accumulated
//!   metrics to a TensorBoard-compatible event writer
//! - `EventWriter` - the summary backend seam, with `tensorboard` (optional
//!   feature), `jsonl` and `console` implementations
//! - `RunnerContext` / `LogBuffer` - the runner-side state hooks consume
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use runlog::prelude::*;
//!
//! let mut ctx = RunnerContext::new("./work_dir", 100);
//! let mut hook = MetricLoggerHook::new(LoggerConfig::default().interval(10));
//!
//! hook.before_run(&ctx)?;
//! loop {
//!     // ... one training iteration ...
//!     ctx.buffer.push_scalar("loss", 0.42);
//!     hook.after_train_iter(&mut ctx)?;
//!     ctx.advance_iter();
//! }
//! hook.after_run(&ctx)?;
//! ```

pub mod buffer;
pub mod dist;
pub mod hook;
pub mod runner;
pub mod writer;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::buffer::{LogBuffer, TagValue};
    pub use crate::dist::DistributedInfo;
    pub use crate::hook::{LoggerBase, LoggerConfig, MetricLoggerHook};
    pub use crate::runner::RunnerContext;
    pub use crate::writer::{create_writer, EventWriter, SummaryBackend};
    pub use crate::writer::{ConsoleWriter, JsonlWriter};
    #[cfg(feature = "tensorboard")]
    pub use crate::writer::TensorBoardWriter;
    pub use crate::{Result, RunlogError};
}

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Error types for the library
#[derive(Debug, thiserror::Error)]
pub enum RunlogError {
    #[error("summary backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("hook not ready: {0}")]
    NotReady(&'static str),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RunlogError>;
