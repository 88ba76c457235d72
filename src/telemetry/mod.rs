//! Observability collaborators: log sinks and run metrics.
//!
//! Nothing in this module affects control flow; every sink and counter can
//! be swapped or discarded without changing queue or worker behavior.

pub mod export;
pub mod log;
pub mod metrics;

pub use export::{JsonExporter, MetricsExporter};
pub use log::{LogSink, MemorySink, NoopSink, StderrSink};
pub use metrics::{Metrics, MetricsSnapshot};
