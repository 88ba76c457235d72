//! Dray - a minimal concurrent task-distribution core.
//!
//! A single producer enqueues opaque units of work, a fixed pool of worker
//! threads consumes them, and the run ends in a clean, race-free shutdown
//! once the producer signals end-of-input and every queued task has been
//! drained.
//!
//! The coordination protocol lives in [`queue::TaskQueue`] and [`worker`]:
//! one mutex guards the pending sequence and the closed flag jointly, so a
//! worker's "empty and closed" exit decision is a single atomic step and no
//! task can slip between the two reads.
//!
//! # Quick Start
//!
//! ```no_run
//! use dray_rs::prelude::*;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! let config = Config::builder().num_workers(2).build().unwrap();
//! let handler = Arc::new(SimulatedWork::new(Duration::from_millis(5)));
//!
//! let report = dray_rs::run_to_completion(
//!     &config,
//!     (0..3).map(|i| Task::new(format!("Task {i}"))),
//!     handler,
//! )
//! .unwrap();
//!
//! assert_eq!(report.tasks_executed, 3);
//! ```
//!
//! # Wait strategies
//!
//! - [`WaitStrategy::Block`] (default): workers park on the queue's condvar;
//!   a push wakes one of them, close wakes all of them.
//! - [`WaitStrategy::Poll`]: workers sleep a fixed interval between polls,
//!   the minimal protocol with termination latency bounded by one interval.

#![warn(missing_docs, missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod pool;
pub mod prelude;
pub mod producer;
pub mod queue;
pub mod task;
pub mod telemetry;
pub mod worker;

pub use config::{Config, ConfigBuilder, WaitStrategy};
pub use error::{Error, Result};
pub use orchestrator::{run_to_completion, run_with_sink, RunReport};
pub use pool::WorkerPool;
pub use producer::Producer;
pub use queue::{Poll, TaskQueue};
pub use task::{SimulatedWork, Task, TaskHandler};
