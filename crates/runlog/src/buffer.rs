//! Metric accumulation between logging intervals.

use ndarray::ArrayD;
use std::collections::HashMap;

/// A metric value classified for logging.
///
/// Classification happens once, where loggable tags are collected: string
/// values are text, array values under a tag containing `"image"` are
/// images, everything else is a scalar.
#[derive(Clone, Debug, PartialEq)]
pub enum TagValue {
    /// Averaged numeric value, keyed by global step.
    Scalar(f64),
    /// Free-form text, keyed by global step.
    Text(String),
    /// CHW image data, keyed by epoch.
    Image(ArrayD<f32>),
}

/// Accumulates named metric values pushed by the training loop.
///
/// Scalars keep a per-tag history and are averaged over the last `n` pushes
/// when `average(n)` is called; text and image entries keep the latest value
/// only. The averaged scalar output stays available (`ready`) until
/// `clear_output` drops it.
#[derive(Debug, Default)]
pub struct LogBuffer {
    history: HashMap<String, Vec<f64>>,
    texts: HashMap<String, String>,
    images: HashMap<String, ArrayD<f32>>,
    output: HashMap<String, f64>,
    ready: bool,
}

impl LogBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a scalar sample for `name`.
    pub fn push_scalar(&mut self, name: impl Into<String>, value: f64) {
        self.history.entry(name.into()).or_default().push(value);
    }

    /// Record a text value for `name`, replacing any previous one.
    pub fn push_text(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.texts.insert(name.into(), text.into());
    }

    /// Record an image for `name`, replacing any previous one.
    pub fn push_image(&mut self, name: impl Into<String>, image: ArrayD<f32>) {
        self.images.insert(name.into(), image);
    }

    /// Average each scalar history over its last `window` samples.
    pub fn average(&mut self, window: usize) {
        for (name, values) in &self.history {
            if values.is_empty() {
                continue;
            }
            let tail = if window > 0 && values.len() > window {
                &values[values.len() - window..]
            } else {
                &values[..]
            };
            let mean = tail.iter().sum::<f64>() / tail.len() as f64;
            self.output.insert(name.clone(), mean);
        }
        self.ready = true;
    }

    /// Whether averaged output is available.
    pub fn ready(&self) -> bool {
        self.ready
    }

    /// Averaged scalar output.
    pub fn output(&self) -> &HashMap<String, f64> {
        &self.output
    }

    /// Latest text entries.
    pub fn texts(&self) -> &HashMap<String, String> {
        &self.texts
    }

    /// Latest image entries.
    pub fn images(&self) -> &HashMap<String, ArrayD<f32>> {
        &self.images
    }

    /// Drop the averaged output; history is kept.
    pub fn clear_output(&mut self) {
        self.output.clear();
        self.ready = false;
    }

    /// Drop everything, history included.
    pub fn clear(&mut self) {
        self.history.clear();
        self.texts.clear();
        self.images.clear();
        self.clear_output();
    }
}
