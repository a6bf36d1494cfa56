//! Simulated training run wired to the metric logging hook.
//!
//! Run with `cargo run --example train_demo`, then inspect the event file
//! under the printed log directory (or point tensorboard at it when built
//! with `--features tensorboard`).

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use ndarray::ArrayD;
use rand::Rng;
use runlog::prelude::*;
use tracing_subscriber::EnvFilter;

const EPOCHS: u64 = 3;
const ITERS_PER_EPOCH: u64 = 50;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let work_dir = std::env::temp_dir().join("runlog_demo");
    let mut ctx = RunnerContext::new(&work_dir, ITERS_PER_EPOCH);

    let config = LoggerConfig::default().interval(10);
    let mut hook = MetricLoggerHook::new(config);
    hook.before_run(&ctx)?;

    let pb = ProgressBar::new(EPOCHS * ITERS_PER_EPOCH);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut rng = rand::thread_rng();
    let mut loss = 2.5f64;

    for _ in 0..EPOCHS {
        for _ in 0..ITERS_PER_EPOCH {
            // Fake one optimization step.
            loss *= 0.995;
            ctx.buffer
                .push_scalar("loss", loss + rng.gen_range(-0.05..0.05));
            ctx.buffer.push_scalar("lr", 3e-4);

            if ctx.end_of_epoch() {
                ctx.buffer
                    .push_text("status", format!("epoch {} done", ctx.epoch));
                ctx.buffer.push_image("sample_image", noise_image(&mut rng));
            }

            hook.after_train_iter(&mut ctx)?;
            pb.set_message(format!("loss: {:.4}", loss));
            pb.inc(1);
            ctx.advance_iter();
        }
    }

    pb.finish_with_message("run complete");
    hook.after_run(&ctx)?;

    if let Some(dir) = hook.log_dir() {
        println!("summaries written to {}", dir.display());
    }
    Ok(())
}

/// A small random CHW image standing in for a model sample.
fn noise_image(rng: &mut impl Rng) -> ArrayD<f32> {
    ArrayD::from_shape_fn(ndarray::IxDyn(&[3, 16, 16]), |_| rng.gen_range(0.0..1.0))
}
