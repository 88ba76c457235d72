use crate::error::{Error, Result};
use std::time::Duration;

/// How a worker waits when the queue is empty but not yet closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaitStrategy {
    /// Sleep a fixed interval, then re-poll. Termination latency after close
    /// is bounded by one interval.
    Poll {
        /// Sleep duration between polls.
        interval: Duration,
    },

    /// Park on the queue's condvar until a push or close wakes the worker.
    /// No poll latency, no idle wakeups.
    Block,
}

impl Default for WaitStrategy {
    fn default() -> Self {
        WaitStrategy::Block
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub num_workers: Option<usize>,
    pub wait_strategy: WaitStrategy,
    pub enqueue_pacing: Duration,
    pub thread_name_prefix: String,
    pub stack_size: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_workers: None,
            wait_strategy: WaitStrategy::default(),
            enqueue_pacing: Duration::ZERO,
            thread_name_prefix: "dray-worker".to_string(),
            stack_size: Some(2 * 1024 * 1024),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(n) = self.num_workers {
            if n == 0 {
                return Err(Error::config("num_workers must be > 0"));
            }
            if n > 1024 {
                return Err(Error::config("num_workers too large (max 1024)"));
            }
        }

        if let WaitStrategy::Poll { interval } = self.wait_strategy {
            if interval.is_zero() {
                return Err(Error::config("poll interval must be > 0"));
            }
        }

        Ok(())
    }

    pub fn worker_count(&self) -> usize {
        self.num_workers.unwrap_or_else(num_cpus::get)
    }
}

#[derive(Debug, Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: Config::default(),
        }
    }

    pub fn num_workers(mut self, n: usize) -> Self {
        self.config.num_workers = Some(n);
        self
    }

    pub fn wait_strategy(mut self, strategy: WaitStrategy) -> Self {
        self.config.wait_strategy = strategy;
        self
    }

    /// Shorthand for `wait_strategy(WaitStrategy::Poll { interval })`.
    pub fn poll_interval(mut self, interval: Duration) -> Self {
        self.config.wait_strategy = WaitStrategy::Poll { interval };
        self
    }

    pub fn enqueue_pacing(mut self, pacing: Duration) -> Self {
        self.config.enqueue_pacing = pacing;
        self
    }

    pub fn thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.config.thread_name_prefix = prefix.into();
        self
    }

    pub fn stack_size(mut self, size: usize) -> Self {
        self.config.stack_size = Some(size);
        self
    }

    pub fn build(self) -> Result<Config> {
        self.config.validate()?;
        Ok(self.config)
    }
}
