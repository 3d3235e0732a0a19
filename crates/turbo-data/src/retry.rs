//! When, and after how long, a failed catalog request is tried again.

use std::time::Duration;

use crate::FetchError;

/// Wait between a failed attempt and the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackoffStrategy {
    /// Retry immediately.
    None,
    /// Same delay every time.
    Fixed(Duration),
    /// `base * 2^attempt`, capped at `max`.
    Exponential { base: Duration, max: Duration },
}

impl BackoffStrategy {
    /// Delay after the 0-indexed `attempt` failed.
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match *self {
            BackoffStrategy::None => Duration::ZERO,
            BackoffStrategy::Fixed(delay) => delay,
            BackoffStrategy::Exponential { base, max } => {
                let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
                base.saturating_mul(factor).min(max)
            }
        }
    }
}

impl Default for BackoffStrategy {
    fn default() -> Self {
        BackoffStrategy::Exponential {
            base: Duration::from_millis(200),
            max: Duration::from_secs(2),
        }
    }
}

/// A class of failure worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryCondition {
    /// One specific HTTP status, e.g. 429.
    Status(u16),
    /// Any 5xx response.
    ServerError,
    /// The request timed out.
    Timeout,
    /// The connection failed before a response arrived.
    ConnectionError,
}

const TRANSIENT: [RetryCondition; 3] = [
    RetryCondition::ServerError,
    RetryCondition::Timeout,
    RetryCondition::ConnectionError,
];

fn http_status(error: &FetchError) -> Option<u16> {
    match error {
        FetchError::Http { status, .. } => Some(*status),
        _ => None,
    }
}

impl RetryCondition {
    pub fn matches(&self, error: &FetchError) -> bool {
        match *self {
            RetryCondition::Status(code) => http_status(error) == Some(code),
            RetryCondition::ServerError => http_status(error).is_some_and(|s| s >= 500),
            RetryCondition::Timeout => matches!(error, FetchError::Timeout(_)),
            RetryCondition::ConnectionError => matches!(error, FetchError::Network(_)),
        }
    }
}

/// How many times, and on which failures, to retry a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries allowed after the first try.
    pub max_attempts: u32,
    pub backoff: BackoffStrategy,
    pub retry_on: Vec<RetryCondition>,
}

impl RetryPolicy {
    /// Retry transient failures up to `max_attempts` times.
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts,
            backoff: BackoffStrategy::default(),
            retry_on: TRANSIENT.to_vec(),
        }
    }

    /// Never retry.
    pub fn none() -> Self {
        Self {
            max_attempts: 0,
            backoff: BackoffStrategy::None,
            retry_on: Vec::new(),
        }
    }

    pub fn with_backoff(mut self, strategy: BackoffStrategy) -> Self {
        self.backoff = strategy;
        self
    }

    pub fn with_conditions(mut self, conditions: Vec<RetryCondition>) -> Self {
        self.retry_on = conditions;
        self
    }

    /// Whether to try again after the 0-indexed `attempt` failed with `error`.
    pub fn should_retry(&self, error: &FetchError, attempt: u32) -> bool {
        attempt < self.max_attempts && self.retry_on.iter().any(|c| c.matches(error))
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(1)
    }
}
