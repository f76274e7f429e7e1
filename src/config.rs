//! # Query Configuration
//!
//! Per-query settings: how many times a request is retransmitted and how
//! long each attempt waits for a reply.
//!
//! Defaults mirror the common interactive case (one attempt, one second).
//! Callers polling flaky or distant servers usually raise the attempt
//! count rather than the timeout.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default number of transmit-and-wait cycles per request
pub const DEFAULT_ATTEMPTS: u32 = 1;

/// Default per-attempt reply timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(1000);

/// Retry and timeout settings applied to every request within one query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Transmit-and-wait cycles per request before the transport gives up
    pub attempts: u32,

    /// How long each attempt waits for a reply datagram
    pub timeout: Duration,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl QueryConfig {
    /// Create a configuration with explicit settings. Attempt counts below
    /// one are bumped to one.
    pub fn new(attempts: u32, timeout: Duration) -> Self {
        Self {
            attempts: attempts.max(1),
            timeout,
        }
    }

    /// Override the attempt count (minimum one)
    pub fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts.max(1);
        self
    }

    /// Override the per-attempt timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
