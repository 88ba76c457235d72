//! Task payloads and the execution seam.

use std::fmt;
use std::time::Duration;

use crate::worker::WorkerId;

/// An opaque unit of work carried by the queue.
///
/// A task has no identity beyond its label: it is created by the producer,
/// handed to exactly one worker, then discarded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Task(String);

impl Task {
    /// Create a task from its label.
    pub fn new(label: impl Into<String>) -> Self {
        Task(label.into())
    }

    /// The payload carried by this task.
    pub fn label(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Task {
    fn from(label: &str) -> Self {
        Task::new(label)
    }
}

impl From<String> for Task {
    fn from(label: String) -> Self {
        Task(label)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What a worker does with a dequeued task.
///
/// Execution is a black box to the coordination core: the queue and the
/// workers only move tasks around, the handler decides what a task means.
/// Handlers are shared across all workers and must be callable concurrently.
pub trait TaskHandler: Send + Sync {
    /// Process one task on the given worker.
    fn handle(&self, worker: WorkerId, task: &Task);
}

/// Stand-in workload that sleeps for a fixed duration per task.
#[derive(Debug, Clone, Copy)]
pub struct SimulatedWork {
    duration: Duration,
}

impl SimulatedWork {
    /// Simulate work taking `duration` per task.
    pub fn new(duration: Duration) -> Self {
        Self { duration }
    }
}

impl TaskHandler for SimulatedWork {
    fn handle(&self, _worker: WorkerId, _task: &Task) {
        std::thread::sleep(self.duration);
    }
}
