//! The shared FIFO and its close protocol.
//!
//! One mutex guards both the pending sequence and the closed flag, so every
//! externally visible operation is a single atomic step. In particular a
//! consumer's joint "empty and closed" exit check can never interleave with
//! a push: no task slips between the two reads, and no worker exits while
//! work is still pending.

use std::collections::VecDeque;

use parking_lot::{Condvar, Mutex};

use crate::task::Task;

/// Outcome of a non-blocking poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Poll {
    /// The head task was removed and handed to the caller.
    Ready(Task),
    /// Nothing pending; `closed` reports whether more input can ever arrive.
    Empty {
        /// End-of-input flag observed in the same atomic step.
        closed: bool,
    },
}

/// Shared FIFO buffer of pending tasks plus the end-of-input flag.
///
/// Held as `Arc<TaskQueue>` jointly by the producer and every worker; the
/// last holder dropping it is the only teardown.
#[derive(Debug)]
pub struct TaskQueue {
    inner: Mutex<QueueState>,
    available: Condvar,
}

#[derive(Debug)]
struct QueueState {
    tasks: VecDeque<Task>,
    closed: bool,
}

impl TaskQueue {
    /// Create an empty, open queue.
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(QueueState {
                tasks: VecDeque::new(),
                closed: false,
            }),
            available: Condvar::new(),
        }
    }

    /// Append a task at the tail and wake one blocked consumer.
    ///
    /// Total: no precondition, cannot fail. The single producer is expected
    /// not to push after [`close`](Self::close); the queue itself does not
    /// police that discipline.
    pub fn push(&self, task: Task) {
        let mut state = self.inner.lock();
        state.tasks.push_back(task);
        self.available.notify_one();
    }

    /// Remove and return the head task, or report emptiness together with
    /// the closed flag observed under the same lock.
    ///
    /// Never blocks; polling consumers re-poll on [`Poll::Empty`].
    pub fn try_pop(&self) -> Poll {
        let mut state = self.inner.lock();
        match state.tasks.pop_front() {
            Some(task) => Poll::Ready(task),
            None => Poll::Empty {
                closed: state.closed,
            },
        }
    }

    /// Block until a task is available (`Some`) or the queue is closed and
    /// drained (`None`).
    ///
    /// [`push`](Self::push) signals one waiter; [`close`](Self::close)
    /// broadcasts to all of them.
    pub fn pop_wait(&self) -> Option<Task> {
        let mut state = self.inner.lock();
        loop {
            if let Some(task) = state.tasks.pop_front() {
                return Some(task);
            }
            if state.closed {
                return None;
            }
            // Wait releases the lock and re-acquires it before returning.
            self.available.wait(&mut state);
        }
    }

    /// Mark end-of-input and wake every blocked consumer.
    ///
    /// Idempotent; the flag is monotonic and never reverts.
    pub fn close(&self) {
        let mut state = self.inner.lock();
        state.closed = true;
        self.available.notify_all();
    }

    /// Number of pending tasks.
    pub fn len(&self) -> usize {
        self.inner.lock().tasks.len()
    }

    /// Whether no tasks are pending.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().tasks.is_empty()
    }

    /// Whether end-of-input has been signaled.
    pub fn is_closed(&self) -> bool {
        self.inner.lock().closed
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new()
    }
}
