//! Timestamped line logging.

use chrono::Local;
use parking_lot::Mutex;

/// Destination for human-readable progress lines.
///
/// The core calls this for observability only. Any implementation (or none)
/// leaves coordination behavior unchanged.
pub trait LogSink: Send + Sync {
    /// Emit one line.
    fn emit(&self, message: &str);
}

/// Writes `[HH:MM:SS] message` lines to stderr.
#[derive(Debug, Default)]
pub struct StderrSink;

impl StderrSink {
    pub fn new() -> Self {
        Self
    }
}

impl LogSink for StderrSink {
    fn emit(&self, message: &str) {
        eprintln!("[{}] {}", Local::now().format("%H:%M:%S"), message);
    }
}

/// Discards everything.
#[derive(Debug, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn emit(&self, _message: &str) {}
}

/// Captures lines in memory, in emission order. Used by tests to assert on
/// observable output.
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything emitted so far.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }
}

impl LogSink for MemorySink {
    fn emit(&self, message: &str) {
        self.lines.lock().push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_sink_keeps_order() {
        let sink = MemorySink::new();
        sink.emit("first");
        sink.emit("second");
        assert_eq!(sink.lines(), vec!["first", "second"]);
    }

    #[test]
    fn test_timestamp_format_is_wall_clock() {
        let stamp = Local::now().format("%H:%M:%S").to_string();
        assert_eq!(stamp.len(), 8);
        assert_eq!(stamp.matches(':').count(), 2);
    }
}
