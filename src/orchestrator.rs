//! One-call driver: spawn the pool, feed the sequence, close, join.

use std::sync::Arc;

use crate::config::Config;
use crate::error::Result;
use crate::pool::WorkerPool;
use crate::producer::Producer;
use crate::task::{Task, TaskHandler};
use crate::telemetry::{LogSink, MetricsSnapshot, StderrSink};
use crate::worker::WorkerId;

/// Summary of one completed run.
#[derive(Debug, Clone)]
pub struct RunReport {
    /// Tasks handed to the queue by the producer.
    pub tasks_submitted: u64,
    /// Tasks pulled and run by workers, contained panics included.
    pub tasks_executed: u64,
    /// Executed-task count per worker, in worker-id order.
    pub per_worker: Vec<(WorkerId, u64)>,
    /// Metrics snapshot taken after the join barrier.
    pub metrics: MetricsSnapshot,
}

/// Run a fixed task sequence to completion: every queued task drained and
/// every worker terminated before this returns.
pub fn run_to_completion<I>(
    config: &Config,
    tasks: I,
    handler: Arc<dyn TaskHandler>,
) -> Result<RunReport>
where
    I: IntoIterator<Item = Task>,
{
    run_with_sink(config, tasks, handler, Arc::new(StderrSink::new()))
}

/// Same as [`run_to_completion`], logging to an explicit sink.
pub fn run_with_sink<I>(
    config: &Config,
    tasks: I,
    handler: Arc<dyn TaskHandler>,
    sink: Arc<dyn LogSink>,
) -> Result<RunReport>
where
    I: IntoIterator<Item = Task>,
{
    let mut pool = WorkerPool::with_sink(config, handler, sink.clone())?;
    let producer = Producer::new(pool.queue())
        .with_pacing(config.enqueue_pacing)
        .with_sink(sink.clone());

    let mut submitted = 0u64;
    producer.feed(tasks.into_iter().inspect(|_| submitted += 1));
    producer.finish();

    pool.join();

    let per_worker = pool.worker_stats();
    let executed = per_worker.iter().map(|&(_, n)| n).sum();
    sink.emit("all tasks processed");

    Ok(RunReport {
        tasks_submitted: submitted,
        tasks_executed: executed,
        per_worker,
        metrics: pool.metrics().snapshot(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::MemorySink;
    use std::time::Duration;

    #[test]
    fn test_report_accounts_for_every_task() {
        let config = Config::builder().num_workers(2).build().unwrap();
        let sink = Arc::new(MemorySink::new());
        let handler = Arc::new(crate::task::SimulatedWork::new(Duration::from_millis(1)));

        let report = run_with_sink(
            &config,
            (0..6).map(|i| Task::new(format!("Task {i}"))),
            handler,
            sink.clone(),
        )
        .unwrap();

        assert_eq!(report.tasks_submitted, 6);
        assert_eq!(report.tasks_executed, 6);
        assert_eq!(report.per_worker.len(), 2);
        assert_eq!(report.per_worker.iter().map(|&(_, n)| n).sum::<u64>(), 6);
        assert_eq!(report.metrics.tasks_executed, 6);

        let lines = sink.lines();
        assert_eq!(lines.last().map(String::as_str), Some("all tasks processed"));
        assert_eq!(
            lines.iter().filter(|l| l.contains("shutting down")).count(),
            2
        );
    }
}
