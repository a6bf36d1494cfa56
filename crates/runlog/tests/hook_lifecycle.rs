use ndarray::{ArrayD, IxDyn};
use runlog::prelude::*;
use serde_json::Value;
use std::fs;
use tempfile::tempdir;

fn read_events(path: &std::path::Path) -> Vec<Value> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[test]
fn test_full_run_writes_jsonl_events() {
    let dir = tempdir().unwrap();
    let mut ctx = RunnerContext::new(dir.path(), 4);
    let config = LoggerConfig::default()
        .interval(2)
        .backend(SummaryBackend::Jsonl);
    let mut hook = MetricLoggerHook::new(config);

    hook.before_run(&ctx).unwrap();

    // Two epochs of four iterations each.
    for _ in 0..8 {
        ctx.buffer.push_scalar("loss", 1.0 / (ctx.iter + 1) as f64);
        ctx.buffer.push_text("caption", format!("epoch {}", ctx.epoch));
        ctx.buffer
            .push_image("sample_image", ArrayD::zeros(IxDyn(&[3, 4, 4])));
        hook.after_train_iter(&mut ctx).unwrap();
        ctx.advance_iter();
    }

    hook.after_run(&ctx).unwrap();
    assert!(!hook.is_open());

    let events = read_events(&dir.path().join("tf_logs").join("events.jsonl"));

    // interval=2 over 2x4 iterations -> logs at global iters 1, 3, 5, 7.
    let scalar_steps: Vec<u64> = events
        .iter()
        .filter(|e| e["kind"] == "scalar" && e["tag"] == "loss")
        .map(|e| e["step"].as_u64().unwrap())
        .collect();
    assert_eq!(scalar_steps, vec![1, 3, 5, 7]);

    let text_steps: Vec<u64> = events
        .iter()
        .filter(|e| e["kind"] == "text")
        .map(|e| e["step"].as_u64().unwrap())
        .collect();
    assert_eq!(text_steps, vec![1, 3, 5, 7]);

    // One image write per epoch, keyed by epoch.
    let image_epochs: Vec<u64> = events
        .iter()
        .filter(|e| e["kind"] == "image")
        .map(|e| e["epoch"].as_u64().unwrap())
        .collect();
    assert_eq!(image_epochs, vec![1, 2]);
}

#[test]
fn test_log_dir_defaults_under_work_dir() {
    let dir = tempdir().unwrap();
    let ctx = RunnerContext::new(dir.path(), 10);
    let mut hook = MetricLoggerHook::new(LoggerConfig::default().backend(SummaryBackend::Jsonl));

    hook.before_run(&ctx).unwrap();
    hook.after_run(&ctx).unwrap();

    assert_eq!(
        hook.log_dir().unwrap(),
        dir.path().join("tf_logs").as_path()
    );
    assert!(dir.path().join("tf_logs").join("events.jsonl").exists());
}

#[test]
fn test_explicit_log_dir_wins() {
    let work = tempdir().unwrap();
    let logs = tempdir().unwrap();
    let ctx = RunnerContext::new(work.path(), 10);
    let config = LoggerConfig::default()
        .backend(SummaryBackend::Jsonl)
        .log_dir(logs.path());
    let mut hook = MetricLoggerHook::new(config);

    hook.before_run(&ctx).unwrap();
    hook.after_run(&ctx).unwrap();

    assert!(logs.path().join("events.jsonl").exists());
    assert!(!work.path().join("tf_logs").exists());
}

#[test]
fn test_worker_rank_writes_nothing() {
    let dir = tempdir().unwrap();
    let mut ctx = RunnerContext::new(dir.path(), 4);
    ctx.dist = DistributedInfo::new(1, 2);
    let config = LoggerConfig::default()
        .interval(1)
        .backend(SummaryBackend::Jsonl);
    let mut hook = MetricLoggerHook::new(config);

    hook.before_run(&ctx).unwrap();
    for _ in 0..4 {
        ctx.buffer.push_scalar("loss", 0.5);
        hook.after_train_iter(&mut ctx).unwrap();
        ctx.advance_iter();
    }
    hook.after_run(&ctx).unwrap();

    assert!(!dir.path().join("tf_logs").exists());
}
