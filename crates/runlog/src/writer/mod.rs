//! Summary event writers.
//!
//! Provides:
//! - `EventWriter` trait for pluggable summary backends
//! - `JsonlWriter` for plain JSON-lines event files
//! - `ConsoleWriter` for lightweight stdout logging via tracing
//! - `TensorBoardWriter` for tfevents files (optional)
//!
//! Backend choice is an explicit `SummaryBackend` value resolved once by
//! `create_writer`; `Auto` picks the tensorboard backend when it was
//! compiled in and falls back to jsonl otherwise.

mod console;
mod jsonl;
#[cfg(feature = "tensorboard")]
mod tensorboard;

pub use console::ConsoleWriter;
pub use jsonl::JsonlWriter;
#[cfg(feature = "tensorboard")]
pub use tensorboard::TensorBoardWriter;

use crate::Result;
use ndarray::ArrayD;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Sink for summary events produced by logging hooks.
///
/// Scalars and text are keyed by global step, images by epoch. Errors are
/// surfaced to the caller; no writer retries internally.
pub trait EventWriter: Send {
    /// Write a scalar summary.
    fn add_scalar(&mut self, tag: &str, value: f64, step: u64) -> Result<()>;

    /// Write a text summary.
    fn add_text(&mut self, tag: &str, text: &str, step: u64) -> Result<()>;

    /// Write an image summary. Image data is CHW.
    fn add_image(&mut self, tag: &str, image: &ArrayD<f32>, epoch: u64) -> Result<()>;

    /// Flush pending writes.
    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    /// Flush and release the writer.
    fn close(&mut self) -> Result<()>;
}

impl std::fmt::Debug for dyn EventWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn EventWriter")
    }
}

/// Which summary backend to write with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SummaryBackend {
    /// Tensorboard when compiled in, jsonl otherwise
    #[default]
    Auto,
    /// tfevents files (requires the `tensorboard` feature)
    TensorBoard,
    /// JSON-lines event file
    Jsonl,
    /// Log events via tracing
    Console,
}

/// Construct the writer for `backend`, bound to `log_dir`.
///
/// Fails with `RunlogError::BackendUnavailable` when the tensorboard
/// backend is requested but the crate was built without it.
pub fn create_writer(backend: SummaryBackend, log_dir: &Path) -> Result<Box<dyn EventWriter>> {
    match backend {
        SummaryBackend::Auto => default_writer(log_dir),
        SummaryBackend::TensorBoard => tensorboard_writer(log_dir),
        SummaryBackend::Jsonl => Ok(Box::new(JsonlWriter::new(log_dir)?)),
        SummaryBackend::Console => Ok(Box::new(ConsoleWriter::new())),
    }
}

#[cfg(feature = "tensorboard")]
fn default_writer(log_dir: &Path) -> Result<Box<dyn EventWriter>> {
    Ok(Box::new(TensorBoardWriter::new(log_dir)?))
}

#[cfg(not(feature = "tensorboard"))]
fn default_writer(log_dir: &Path) -> Result<Box<dyn EventWriter>> {
    Ok(Box::new(JsonlWriter::new(log_dir)?))
}

#[cfg(feature = "tensorboard")]
fn tensorboard_writer(log_dir: &Path) -> Result<Box<dyn EventWriter>> {
    Ok(Box::new(TensorBoardWriter::new(log_dir)?))
}

#[cfg(not(feature = "tensorboard"))]
fn tensorboard_writer(_log_dir: &Path) -> Result<Box<dyn EventWriter>> {
    Err(crate::RunlogError::BackendUnavailable(
        "tensorboard backend requested but runlog was built without the `tensorboard` feature; \
         rebuild with `--features tensorboard` or select the jsonl backend"
            .to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_create_jsonl_writer() {
        let dir = tempdir().unwrap();
        let writer = create_writer(SummaryBackend::Jsonl, dir.path());
        assert!(writer.is_ok());
        assert!(dir.path().join("events.jsonl").exists());
    }

    #[test]
    fn test_auto_resolves_to_some_backend() {
        let dir = tempdir().unwrap();
        assert!(create_writer(SummaryBackend::Auto, dir.path()).is_ok());
    }

    #[test]
    #[cfg(not(feature = "tensorboard"))]
    fn test_tensorboard_unavailable_names_the_feature() {
        let dir = tempdir().unwrap();
        let err = create_writer(SummaryBackend::TensorBoard, dir.path()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("tensorboard"));
        assert!(message.contains("--features tensorboard"));
    }

    #[test]
    fn test_backend_serde_round_trip() {
        let json = serde_json::to_string(&SummaryBackend::TensorBoard).unwrap();
        assert_eq!(json, "\"tensorboard\"");
        let backend: SummaryBackend = serde_json::from_str("\"jsonl\"").unwrap();
        assert_eq!(backend, SummaryBackend::Jsonl);
    }
}
