//! Convenience re-exports for typical use.

pub use crate::config::{Config, ConfigBuilder, WaitStrategy};
pub use crate::error::{Error, Result};
pub use crate::orchestrator::{run_to_completion, run_with_sink, RunReport};
pub use crate::pool::WorkerPool;
pub use crate::producer::Producer;
pub use crate::queue::{Poll, TaskQueue};
pub use crate::task::{SimulatedWork, Task, TaskHandler};
pub use crate::telemetry::{
    JsonExporter, LogSink, MemorySink, Metrics, MetricsExporter, MetricsSnapshot, NoopSink,
    StderrSink,
};
pub use crate::worker::{WorkerId, WorkerState};
