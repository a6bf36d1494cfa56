//! Metric logging hook.

use super::base::{LoggerBase, LoggerConfig};
use crate::buffer::TagValue;
use crate::runner::RunnerContext;
use crate::writer::{create_writer, EventWriter};
use crate::{Result, RunlogError};
use std::path::{Path, PathBuf};

/// Runner hook that forwards accumulated metrics to an event writer.
///
/// Only the master process writes; every lifecycle call is a no-op on other
/// ranks. The writer exists exactly between `before_run` and `after_run`;
/// `log` outside that window is an error.
///
/// # Example
///
/// ```ignore
/// let config = LoggerConfig::default()
///     .interval(10)
///     .backend(SummaryBackend::Jsonl);
/// let mut hook = MetricLoggerHook::new(config);
///
/// hook.before_run(&ctx)?;
/// // per training iteration:
/// hook.after_train_iter(&mut ctx)?;
/// // at the end of the run:
/// hook.after_run(&ctx)?;
/// ```
pub struct MetricLoggerHook {
    base: LoggerBase,
    writer: Option<Box<dyn EventWriter>>,
    /// Writer to install at `before_run` instead of building one from the
    /// configured backend.
    pending: Option<Box<dyn EventWriter>>,
    /// Epochs that already received an image write.
    image_logged_epochs: Vec<u64>,
    resolved_dir: Option<PathBuf>,
}

impl MetricLoggerHook {
    /// Create the hook. No I/O happens until `before_run`.
    pub fn new(config: LoggerConfig) -> Self {
        Self {
            base: LoggerBase::new(config),
            writer: None,
            pending: None,
            image_logged_epochs: Vec::new(),
            resolved_dir: None,
        }
    }

    /// Use a caller-supplied writer instead of the configured backend.
    pub fn with_writer(mut self, writer: Box<dyn EventWriter>) -> Self {
        self.pending = Some(writer);
        self
    }

    /// Hook configuration.
    pub fn config(&self) -> &LoggerConfig {
        &self.base.config
    }

    /// The directory the writer was bound to, once `before_run` resolved it.
    pub fn log_dir(&self) -> Option<&Path> {
        self.resolved_dir.as_deref()
    }

    /// Whether a writer is currently open.
    pub fn is_open(&self) -> bool {
        self.writer.is_some()
    }

    /// Resolve the log directory and open the event writer.
    ///
    /// Called again without an intervening `after_run`, the previous writer
    /// is closed before the new one is built.
    pub fn before_run(&mut self, ctx: &RunnerContext) -> Result<()> {
        if !ctx.dist.is_master() {
            return Ok(());
        }

        if let Some(mut old) = self.writer.take() {
            tracing::warn!("before_run called with an open writer, closing the previous one");
            old.close()?;
        }

        let dir = match &self.base.config.log_dir {
            Some(dir) => dir.clone(),
            None => ctx.work_dir.join("tf_logs"),
        };

        let writer = match self.pending.take() {
            Some(writer) => writer,
            None => create_writer(self.base.config.backend, &dir)?,
        };

        tracing::info!(dir = %dir.display(), "metric logging started");
        self.writer = Some(writer);
        self.resolved_dir = Some(dir);
        Ok(())
    }

    /// Log once if the current iteration qualifies.
    pub fn after_train_iter(&mut self, ctx: &mut RunnerContext) -> Result<()> {
        if !ctx.dist.is_master() {
            return Ok(());
        }
        if !self.base.should_log(ctx) {
            return Ok(());
        }
        ctx.buffer.average(self.base.config.interval as usize);
        self.log(ctx)
    }

    /// Write every loggable tag to the event writer.
    ///
    /// Text and scalars are keyed by the global iteration; images by the
    /// epoch, at most one image write per epoch.
    pub fn log(&mut self, ctx: &mut RunnerContext) -> Result<()> {
        if !ctx.dist.is_master() {
            return Ok(());
        }
        // The writer must be open before the buffer is touched.
        if self.writer.is_none() {
            return Err(RunlogError::NotReady(
                "log called before before_run or after after_run",
            ));
        }

        let step = ctx.iter;
        let epoch = ctx.epoch;
        let tags = self.base.collect_tags(&mut ctx.buffer, true, true);

        if let Some(writer) = self.writer.as_mut() {
            for (tag, value) in tags {
                match value {
                    TagValue::Text(text) => writer.add_text(&tag, &text, step)?,
                    TagValue::Image(image) => {
                        if self.image_logged_epochs.contains(&epoch) {
                            continue;
                        }
                        writer.add_image(&tag, &image, epoch)?;
                        self.image_logged_epochs.push(epoch);
                    }
                    TagValue::Scalar(value) => writer.add_scalar(&tag, value, step)?,
                }
            }
        }

        if self.base.config.reset_flag {
            ctx.buffer.clear_output();
        }
        Ok(())
    }

    /// Flush and release the writer.
    pub fn after_run(&mut self, ctx: &RunnerContext) -> Result<()> {
        if !ctx.dist.is_master() {
            return Ok(());
        }
        if let Some(mut writer) = self.writer.take() {
            writer.close()?;
            tracing::info!("metric logging closed");
        }
        Ok(())
    }
}
