//! The classic ten-task run: five workers polling a shared queue while the
//! producer feeds paced enqueues, then a clean drain-and-shutdown.
//!
//! Run with: `cargo run --example paced_feed`

use dray_rs::prelude::*;
use std::sync::Arc;
use std::time::Duration;

fn main() -> dray_rs::Result<()> {
    let config = Config::builder()
        .num_workers(5)
        .poll_interval(Duration::from_millis(100))
        .enqueue_pacing(Duration::from_millis(100))
        .build()?;

    let handler = Arc::new(SimulatedWork::new(Duration::from_millis(500)));
    let tasks = (0..10).map(|i| Task::new(format!("Task {i}")));

    let report = run_to_completion(&config, tasks, handler)?;

    println!(
        "executed {} tasks across {} workers ({:.1} tasks/s)",
        report.tasks_executed,
        report.per_worker.len(),
        report.metrics.tasks_per_second()
    );
    for (id, count) in &report.per_worker {
        println!("  worker {id}: {count}");
    }

    Ok(())
}
