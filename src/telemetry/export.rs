//! Metrics export to external formats.

use std::path::PathBuf;

use serde::Serialize;

use super::metrics::MetricsSnapshot;
use crate::error::{Error, Result};

/// Exports a metrics snapshot somewhere a human or another tool can read it.
pub trait MetricsExporter: Send + Sync {
    /// Export one snapshot.
    fn export(&self, snapshot: &MetricsSnapshot) -> Result<()>;
}

/// Writes a pretty-printed JSON snapshot to a file.
#[derive(Debug)]
pub struct JsonExporter {
    output_path: PathBuf,
}

impl JsonExporter {
    /// Exporter writing to `output_path`, overwriting any previous snapshot.
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }
}

impl MetricsExporter for JsonExporter {
    fn export(&self, snapshot: &MetricsSnapshot) -> Result<()> {
        let serializable = SerializableSnapshot::from(snapshot);
        let json = serde_json::to_string_pretty(&serializable)
            .map_err(|e| Error::export(format!("JSON serialization failed: {}", e)))?;

        std::fs::write(&self.output_path, json)?;
        Ok(())
    }
}

/// Serializable mirror of [`MetricsSnapshot`] with human-scale units.
#[derive(Debug, Clone, Serialize)]
struct SerializableSnapshot {
    uptime_secs: f64,
    tasks_executed: u64,
    tasks_panicked: u64,
    idle_time_ms: u64,
    busy_time_ms: u64,
    avg_latency_us: f64,
    p50_latency_us: f64,
    p99_latency_us: f64,
    max_latency_us: f64,
    utilization: f64,
    tasks_per_second: f64,
}

impl From<&MetricsSnapshot> for SerializableSnapshot {
    fn from(snapshot: &MetricsSnapshot) -> Self {
        Self {
            uptime_secs: snapshot.uptime.as_secs_f64(),
            tasks_executed: snapshot.tasks_executed,
            tasks_panicked: snapshot.tasks_panicked,
            idle_time_ms: snapshot.idle_time_ns / 1_000_000,
            busy_time_ms: snapshot.busy_time_ns / 1_000_000,
            avg_latency_us: snapshot.avg_latency_ns as f64 / 1_000.0,
            p50_latency_us: snapshot.p50_latency_ns as f64 / 1_000.0,
            p99_latency_us: snapshot.p99_latency_ns as f64 / 1_000.0,
            max_latency_us: snapshot.max_latency_ns as f64 / 1_000.0,
            utilization: snapshot.utilization(),
            tasks_per_second: snapshot.tasks_per_second(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::Metrics;

    #[test]
    fn test_json_export_round_trips() {
        let metrics = Metrics::new();
        metrics.record_task_execution(5_000);

        let path = std::env::temp_dir().join(format!("dray-metrics-{}.json", std::process::id()));
        let exporter = JsonExporter::new(&path);
        exporter.export(&metrics.snapshot()).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(value["tasks_executed"], 1);

        let _ = std::fs::remove_file(&path);
    }
}
