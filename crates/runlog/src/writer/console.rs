//! Console summary backend.

use super::EventWriter;
use crate::Result;
use ndarray::ArrayD;

/// Writer that prints summary events to stdout via tracing.
pub struct ConsoleWriter;

impl Default for ConsoleWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsoleWriter {
    pub fn new() -> Self {
        Self
    }
}

impl EventWriter for ConsoleWriter {
    fn add_scalar(&mut self, tag: &str, value: f64, step: u64) -> Result<()> {
        tracing::info!("Step {}: {} = {:.4}", step, tag, value);
        Ok(())
    }

    fn add_text(&mut self, tag: &str, text: &str, step: u64) -> Result<()> {
        tracing::info!("Step {}: {} = {:?}", step, tag, text);
        Ok(())
    }

    fn add_image(&mut self, tag: &str, image: &ArrayD<f32>, epoch: u64) -> Result<()> {
        tracing::info!("Epoch {}: {} image {:?}", epoch, tag, image.shape());
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        Ok(())
    }
}
