//! JSON-lines event writer.
//!
//! The default fallback backend: one JSON object per line in
//! `<log_dir>/events.jsonl`. Scalars and text carry `tag` and `step`,
//! images carry `tag`, `epoch`, `dims` and the flattened CHW data.

use super::EventWriter;
use crate::Result;
use ndarray::ArrayD;
use serde_json::json;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Writer that records summary events as JSON lines.
pub struct JsonlWriter {
    writer: BufWriter<File>,
    path: PathBuf,
}

impl JsonlWriter {
    /// Create the log directory and open `events.jsonl` inside it.
    pub fn new(log_dir: impl AsRef<Path>) -> Result<Self> {
        let dir = log_dir.as_ref();
        fs::create_dir_all(dir)?;

        let path = dir.join("events.jsonl");
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;

        Ok(Self {
            writer: BufWriter::new(file),
            path,
        })
    }

    /// Path of the event file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_entry(&mut self, entry: serde_json::Value) -> Result<()> {
        serde_json::to_writer(&mut self.writer, &entry)?;
        self.writer.write_all(b"\n")?;
        Ok(())
    }
}

impl EventWriter for JsonlWriter {
    fn add_scalar(&mut self, tag: &str, value: f64, step: u64) -> Result<()> {
        self.write_entry(json!({
            "kind": "scalar",
            "tag": tag,
            "value": value,
            "step": step,
        }))
    }

    fn add_text(&mut self, tag: &str, text: &str, step: u64) -> Result<()> {
        self.write_entry(json!({
            "kind": "text",
            "tag": tag,
            "text": text,
            "step": step,
        }))
    }

    fn add_image(&mut self, tag: &str, image: &ArrayD<f32>, epoch: u64) -> Result<()> {
        let data: Vec<f32> = image.iter().copied().collect();
        self.write_entry(json!({
            "kind": "image",
            "tag": tag,
            "epoch": epoch,
            "dims": image.shape(),
            "data": data,
        }))
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::IxDyn;
    use serde_json::Value;
    use tempfile::tempdir;

    #[test]
    fn test_events_round_trip() {
        let dir = tempdir().unwrap();
        let mut writer = JsonlWriter::new(dir.path()).unwrap();

        writer.add_scalar("loss", 0.42, 7).unwrap();
        writer.add_text("caption", "hello", 7).unwrap();
        writer
            .add_image("sample_image", &ArrayD::zeros(IxDyn(&[3, 2, 2])), 3)
            .unwrap();
        writer.close().unwrap();

        let contents = fs::read_to_string(writer.path()).unwrap();
        let events: Vec<Value> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0]["kind"], "scalar");
        assert_eq!(events[0]["value"], 0.42);
        assert_eq!(events[0]["step"], 7);
        assert_eq!(events[1]["kind"], "text");
        assert_eq!(events[1]["text"], "hello");
        assert_eq!(events[2]["kind"], "image");
        assert_eq!(events[2]["epoch"], 3);
        assert_eq!(events[2]["dims"], json!([3, 2, 2]));
        assert_eq!(events[2]["data"].as_array().unwrap().len(), 12);
    }

    #[test]
    fn test_creates_log_dir() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        let writer = JsonlWriter::new(&nested).unwrap();
        assert!(nested.exists());
        assert_eq!(writer.path(), nested.join("events.jsonl"));
    }
}
