//! Fixed pool of worker threads draining one shared queue.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::queue::TaskQueue;
use crate::task::{Task, TaskHandler};
use crate::telemetry::{LogSink, Metrics, StderrSink};
use crate::worker::{Worker, WorkerId, WorkerState};

/// A fixed set of worker threads bound to one shared queue.
///
/// Shutdown protocol: [`close`](Self::close) signals end-of-input, workers
/// drain whatever is queued and terminate, [`join`](Self::join) waits for
/// all of them. Dropping the pool performs close-then-join, so a pool can
/// never go out of scope with live threads.
pub struct WorkerPool {
    workers: Vec<WorkerHandle>,
    queue: Arc<TaskQueue>,
    stop: Arc<AtomicBool>,
    metrics: Arc<Metrics>,
    num_workers: usize,
}

struct WorkerHandle {
    id: WorkerId,
    state: Arc<WorkerState>,
    thread: Option<JoinHandle<()>>,
}

impl WorkerPool {
    /// Spawn `config.worker_count()` workers logging to stderr.
    pub fn new(config: &Config, handler: Arc<dyn TaskHandler>) -> Result<Self> {
        Self::with_sink(config, handler, Arc::new(StderrSink::new()))
    }

    /// Spawn workers with an explicit log sink.
    pub fn with_sink(
        config: &Config,
        handler: Arc<dyn TaskHandler>,
        sink: Arc<dyn LogSink>,
    ) -> Result<Self> {
        config.validate()?;
        let num_workers = config.worker_count();

        let queue = Arc::new(TaskQueue::new());
        let stop = Arc::new(AtomicBool::new(false));
        let metrics = Arc::new(Metrics::new());

        let mut workers = Vec::with_capacity(num_workers);

        for id in 0..num_workers {
            let state = Arc::new(WorkerState::default());
            let worker = Worker {
                id,
                state: state.clone(),
                queue: queue.clone(),
                handler: handler.clone(),
                metrics: metrics.clone(),
                sink: sink.clone(),
            };
            let strategy = config.wait_strategy;
            let stop_clone = stop.clone();

            let mut builder =
                thread::Builder::new().name(format!("{}-{}", config.thread_name_prefix, id));
            if let Some(stack_size) = config.stack_size {
                builder = builder.stack_size(stack_size);
            }

            let thread = builder
                .spawn(move || worker.run(strategy, stop_clone))
                .map_err(|e| Error::pool(format!("spawn failed: {}", e)))?;

            workers.push(WorkerHandle {
                id,
                state,
                thread: Some(thread),
            });
        }

        Ok(Self {
            workers,
            queue,
            stop,
            metrics,
            num_workers,
        })
    }

    /// Enqueue one task.
    pub fn submit(&self, task: Task) {
        self.queue.push(task);
    }

    /// Signal end-of-input. Workers drain what is queued, then terminate.
    pub fn close(&self) {
        self.queue.close();
    }

    /// Cooperative early stop: each worker exits at the top of its next
    /// iteration without draining the queue.
    ///
    /// Extension point for fast shutdown; the normal path is
    /// [`close`](Self::close) followed by [`join`](Self::join). Also closes
    /// the queue so consumers parked on the condvar wake up.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
        self.queue.close();
    }

    /// Block until every worker has terminated.
    pub fn join(&mut self) {
        for worker in &mut self.workers {
            if let Some(thread) = worker.thread.take() {
                let _ = thread.join();
            }
        }
    }

    /// Shared handle to the queue this pool drains.
    pub fn queue(&self) -> Arc<TaskQueue> {
        self.queue.clone()
    }

    /// Number of workers in the pool.
    pub fn num_workers(&self) -> usize {
        self.num_workers
    }

    /// Run-wide metrics shared by every worker.
    pub fn metrics(&self) -> Arc<Metrics> {
        self.metrics.clone()
    }

    /// Tasks executed per worker, in worker-id order.
    pub fn worker_stats(&self) -> Vec<(WorkerId, u64)> {
        self.workers
            .iter()
            .map(|w| (w.id, w.state.tasks_executed.load(Ordering::Relaxed)))
            .collect()
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.queue.close();
        self.join();
    }
}

impl fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkerPool")
            .field("num_workers", &self.num_workers)
            .field("pending", &self.queue.len())
            .field("closed", &self.queue.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::NoopSink;
    use std::sync::atomic::AtomicU64;
    use std::time::Duration;

    struct Counter {
        count: AtomicU64,
    }

    impl Counter {
        fn new() -> Self {
            Self {
                count: AtomicU64::new(0),
            }
        }
    }

    impl TaskHandler for Counter {
        fn handle(&self, _worker: WorkerId, _task: &Task) {
            self.count.fetch_add(1, Ordering::Relaxed);
        }
    }

    fn test_config(workers: usize) -> Config {
        Config::builder().num_workers(workers).build().unwrap()
    }

    #[test]
    fn test_close_then_join_processes_everything() {
        let counter = Arc::new(Counter::new());
        let mut pool =
            WorkerPool::with_sink(&test_config(3), counter.clone(), Arc::new(NoopSink)).unwrap();

        for i in 0..20 {
            pool.submit(Task::new(format!("Task {i}")));
        }
        pool.close();
        pool.join();

        assert_eq!(counter.count.load(Ordering::Relaxed), 20);
        assert!(pool.queue().is_empty());

        let per_worker: u64 = pool.worker_stats().iter().map(|&(_, n)| n).sum();
        assert_eq!(per_worker, 20);
    }

    #[test]
    fn test_drop_closes_and_joins() {
        let counter = Arc::new(Counter::new());
        {
            let pool =
                WorkerPool::with_sink(&test_config(2), counter.clone(), Arc::new(NoopSink))
                    .unwrap();
            for i in 0..10 {
                pool.submit(Task::new(format!("Task {i}")));
            }
            // No explicit close: Drop must close and join.
        }
        assert_eq!(counter.count.load(Ordering::Relaxed), 10);
    }

    #[test]
    fn test_stop_leaves_pending_tasks() {
        let handler = Arc::new(crate::task::SimulatedWork::new(Duration::from_millis(20)));
        let mut pool =
            WorkerPool::with_sink(&test_config(1), handler, Arc::new(NoopSink)).unwrap();

        for i in 0..50 {
            pool.submit(Task::new(format!("Task {i}")));
        }
        thread::sleep(Duration::from_millis(30));
        pool.stop();
        pool.join();

        // The worker quit mid-backlog instead of draining.
        assert!(!pool.queue().is_empty());
    }

    #[test]
    fn test_invalid_config_refused() {
        let config = Config {
            num_workers: Some(0),
            ..Config::default()
        };
        let result = WorkerPool::with_sink(&config, Arc::new(Counter::new()), Arc::new(NoopSink));
        assert!(result.is_err());
    }

    #[test]
    fn test_join_is_reentrant() {
        let counter = Arc::new(Counter::new());
        let mut pool =
            WorkerPool::with_sink(&test_config(2), counter, Arc::new(NoopSink)).unwrap();
        pool.close();
        pool.join();
        pool.join();
    }
}
