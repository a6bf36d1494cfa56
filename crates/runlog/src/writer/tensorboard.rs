//! TensorBoard summary backend.

use super::EventWriter;
use crate::Result;
use ndarray::ArrayD;
use serde_json::json;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tensorboard_rs::summary_writer::SummaryWriter;

/// Writer that emits tfevents files readable by `tensorboard --logdir`.
///
/// tensorboard-rs has no text plugin support, so text summaries go to a
/// JSONL sidecar in the log directory instead of being dropped.
// TODO: emit native text summaries once tensorboard-rs supports them.
pub struct TensorBoardWriter {
    writer: SummaryWriter,
    text_sidecar: BufWriter<File>,
    log_dir: PathBuf,
}

impl TensorBoardWriter {
    /// Create the log directory and bind a summary writer to it.
    pub fn new(log_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = log_dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;

        let writer = SummaryWriter::new(&dir);
        let sidecar = OpenOptions::new()
            .create(true)
            .append(true)
            .open(dir.join("text_summaries.jsonl"))?;

        Ok(Self {
            writer,
            text_sidecar: BufWriter::new(sidecar),
            log_dir: dir,
        })
    }

    /// The directory the writer is bound to.
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

impl EventWriter for TensorBoardWriter {
    fn add_scalar(&mut self, tag: &str, value: f64, step: u64) -> Result<()> {
        self.writer.add_scalar(tag, value as f32, step as usize);
        Ok(())
    }

    fn add_text(&mut self, tag: &str, text: &str, step: u64) -> Result<()> {
        let entry = json!({"tag": tag, "text": text, "step": step});
        serde_json::to_writer(&mut self.text_sidecar, &entry)?;
        self.text_sidecar.write_all(b"\n")?;
        Ok(())
    }

    fn add_image(&mut self, tag: &str, image: &ArrayD<f32>, epoch: u64) -> Result<()> {
        // CHW float data in [0, 1], scaled to RGB8 for the image summary.
        let data: Vec<u8> = image
            .iter()
            .map(|v| (v.clamp(0.0, 1.0) * 255.0) as u8)
            .collect();
        self.writer.add_image(tag, &data, image.shape(), epoch as usize);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush();
        self.text_sidecar.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.flush()
    }
}
