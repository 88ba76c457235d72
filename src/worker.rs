//! Worker consumption loop.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Instant;

use crate::config::WaitStrategy;
use crate::queue::{Poll, TaskQueue};
use crate::task::{Task, TaskHandler};
use crate::telemetry::{LogSink, Metrics};

pub type WorkerId = usize;

/// Per-worker execution counters, shared with the pool for reporting.
#[derive(Debug, Default)]
pub struct WorkerState {
    pub tasks_executed: AtomicU64,
    pub idle_time_ns: AtomicU64,
}

pub(crate) struct Worker {
    pub id: WorkerId,
    pub state: Arc<WorkerState>,
    pub queue: Arc<TaskQueue>,
    pub handler: Arc<dyn TaskHandler>,
    pub metrics: Arc<Metrics>,
    pub sink: Arc<dyn LogSink>,
}

impl Worker {
    /// The consumption loop. Returns only when the queue is closed and
    /// drained, or when the cooperative stop flag is raised.
    ///
    /// The exit check rides on the queue's single lock: "empty and closed"
    /// is observed in one atomic step, so a worker never gives up while a
    /// task is still pending.
    pub fn run(&self, strategy: WaitStrategy, stop: Arc<AtomicBool>) {
        loop {
            // Cooperative early-stop extension point; never raised during a
            // normal close-and-drain shutdown.
            if stop.load(Ordering::Acquire) {
                break;
            }

            match strategy {
                WaitStrategy::Poll { interval } => match self.queue.try_pop() {
                    Poll::Ready(task) => self.execute(task),
                    Poll::Empty { closed: true } => break,
                    Poll::Empty { closed: false } => {
                        let idle = Instant::now();
                        thread::sleep(interval);
                        self.record_idle(idle);
                    }
                },
                WaitStrategy::Block => {
                    let idle = Instant::now();
                    let popped = self.queue.pop_wait();
                    self.record_idle(idle);
                    match popped {
                        Some(task) => self.execute(task),
                        None => break,
                    }
                }
            }
        }

        self.sink.emit(&format!("worker {} shutting down", self.id));
    }

    fn execute(&self, task: Task) {
        self.sink
            .emit(&format!("worker {} processing {}", self.id, task));

        let start = Instant::now();
        let result = catch_unwind(AssertUnwindSafe(|| self.handler.handle(self.id, &task)));
        let duration_ns = start.elapsed().as_nanos() as u64;

        match result {
            Ok(()) => self.metrics.record_task_execution(duration_ns),
            Err(_) => {
                // Contain the panic: the loop keeps draining.
                self.sink
                    .emit(&format!("worker {} panicked on {}", self.id, task));
                self.metrics.record_task_panic();
            }
        }

        self.state.tasks_executed.fetch_add(1, Ordering::Relaxed);
    }

    fn record_idle(&self, since: Instant) {
        let idle_ns = since.elapsed().as_nanos() as u64;
        self.state.idle_time_ns.fetch_add(idle_ns, Ordering::Relaxed);
        self.metrics.record_idle_time(idle_ns);
    }
}
