//! Shared logging-hook behavior: interval gating and tag collection.

use crate::buffer::{LogBuffer, TagValue};
use crate::runner::RunnerContext;
use crate::writer::SummaryBackend;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for logging hooks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// Output directory; defaults to `<work_dir>/tf_logs` when unset
    pub log_dir: Option<PathBuf>,
    /// Log every N iterations
    pub interval: u64,
    /// Skip the trailing partial window at the end of an epoch
    pub ignore_last: bool,
    /// Clear the averaged buffer output after each log
    pub reset_flag: bool,
    /// Count the interval within the epoch rather than globally
    pub by_epoch: bool,
    /// Summary backend to write with
    pub backend: SummaryBackend,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        Self {
            log_dir: None,
            interval: 10,
            ignore_last: true,
            reset_flag: false,
            by_epoch: true,
            backend: SummaryBackend::Auto,
        }
    }
}

impl LoggerConfig {
    /// Set the output directory.
    pub fn log_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.log_dir = Some(dir.into());
        self
    }

    /// Set the logging interval.
    pub fn interval(mut self, interval: u64) -> Self {
        self.interval = interval;
        self
    }

    /// Set whether the trailing partial window is skipped.
    pub fn ignore_last(mut self, ignore: bool) -> Self {
        self.ignore_last = ignore;
        self
    }

    /// Set whether averaged output is cleared after each log.
    pub fn reset_flag(mut self, reset: bool) -> Self {
        self.reset_flag = reset;
        self
    }

    /// Set whether intervals are counted within the epoch.
    pub fn by_epoch(mut self, by_epoch: bool) -> Self {
        self.by_epoch = by_epoch;
        self
    }

    /// Set the summary backend.
    pub fn backend(mut self, backend: SummaryBackend) -> Self {
        self.backend = backend;
        self
    }
}

/// Interval bookkeeping and tag collection shared by logging hooks.
pub struct LoggerBase {
    pub config: LoggerConfig,
}

impl LoggerBase {
    pub fn new(config: LoggerConfig) -> Self {
        Self { config }
    }

    /// Whether the current iteration qualifies for logging.
    pub fn should_log(&self, ctx: &RunnerContext) -> bool {
        let current = if self.config.by_epoch {
            ctx.inner_iter + 1
        } else {
            ctx.iter + 1
        };
        if current.is_multiple_of(self.config.interval) {
            return true;
        }
        // Trailing iterations that don't fill a window log only when
        // ignore_last is off.
        ctx.end_of_epoch() && !self.config.ignore_last
    }

    /// Collect loggable tags from the buffer, classifying each value once.
    ///
    /// String values are text; other values under a tag containing
    /// `"image"` are images; everything else is a scalar. Values the
    /// classification cannot route (an array under a non-image tag, a
    /// scalar under an image tag) are skipped with a warning.
    pub fn collect_tags(
        &self,
        buffer: &mut LogBuffer,
        allow_text: bool,
        allow_image: bool,
    ) -> Vec<(String, TagValue)> {
        if !buffer.ready() {
            buffer.average(self.config.interval as usize);
        }

        let mut tags = Vec::new();

        if allow_text {
            for (name, text) in buffer.texts() {
                tags.push((name.clone(), TagValue::Text(text.clone())));
            }
        }

        if allow_image {
            for (name, image) in buffer.images() {
                if name.contains("image") {
                    tags.push((name.clone(), TagValue::Image(image.clone())));
                } else {
                    tracing::warn!(tag = %name, "array-valued tag without image naming, skipping");
                }
            }
        }

        for (name, value) in buffer.output() {
            if name.contains("image") {
                tracing::warn!(tag = %name, "scalar tag named like an image, skipping");
                continue;
            }
            tags.push((name.clone(), TagValue::Scalar(*value)));
        }

        tags
    }
}
