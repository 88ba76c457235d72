//! Producer-side glue: paced feeding and end-of-input.

use std::fmt;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::queue::TaskQueue;
use crate::task::Task;
use crate::telemetry::{LogSink, NoopSink};

/// Feeds an ordered sequence of tasks into a queue with inter-enqueue
/// pacing, then signals that no more input will ever arrive.
pub struct Producer {
    queue: Arc<TaskQueue>,
    pacing: Duration,
    sink: Arc<dyn LogSink>,
}

impl Producer {
    /// Producer over `queue` with no pacing and no logging.
    pub fn new(queue: Arc<TaskQueue>) -> Self {
        Self {
            queue,
            pacing: Duration::ZERO,
            sink: Arc::new(NoopSink),
        }
    }

    /// Sleep `pacing` between consecutive pushes.
    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Log each enqueue to `sink`.
    pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Push every task in order, pacing between pushes.
    pub fn feed<I>(&self, tasks: I)
    where
        I: IntoIterator<Item = Task>,
    {
        for task in tasks {
            self.sink.emit(&format!("queued {}", task));
            self.queue.push(task);
            if !self.pacing.is_zero() {
                thread::sleep(self.pacing);
            }
        }
    }

    /// Signal end-of-input.
    ///
    /// Consumes the producer, so feeding after close is unrepresentable;
    /// the underlying [`TaskQueue::close`] stays idempotent regardless.
    pub fn finish(self) {
        self.queue.close();
    }
}

impl fmt::Debug for Producer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Producer")
            .field("pacing", &self.pacing)
            .field("pending", &self.queue.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::queue::Poll;
    use crate::telemetry::MemorySink;

    #[test]
    fn test_feed_preserves_order_then_finish_closes() {
        let queue = Arc::new(TaskQueue::new());
        let producer = Producer::new(Arc::clone(&queue));

        producer.feed((0..3).map(|i| Task::new(format!("Task {i}"))));
        producer.finish();

        assert_eq!(queue.try_pop(), Poll::Ready(Task::new("Task 0")));
        assert_eq!(queue.try_pop(), Poll::Ready(Task::new("Task 1")));
        assert_eq!(queue.try_pop(), Poll::Ready(Task::new("Task 2")));
        assert_eq!(queue.try_pop(), Poll::Empty { closed: true });
    }

    #[test]
    fn test_feed_logs_each_enqueue() {
        let queue = Arc::new(TaskQueue::new());
        let sink = Arc::new(MemorySink::new());
        let producer = Producer::new(queue).with_sink(sink.clone());

        producer.feed(vec![Task::new("a"), Task::new("b")]);

        assert_eq!(sink.lines(), vec!["queued a", "queued b"]);
    }
}
