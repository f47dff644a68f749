//! # Recovery defaults.
//!
//! [`Config`] holds the settings a saga executor applies to steps that do not
//! override them. It is consumed by [`SagaRequest::with_defaults`](crate::SagaRequest::with_defaults)
//! and, for the bus size, by [`Config::bus`].
//!
//! ## Sentinel values
//! - `retries <= 0` → retry forever
//! - `retry_delay = 0s` → retry immediately
//! - `backoff = None` → fixed `retry_delay` between attempts
//! - `timeout = 0s` → no per-attempt timeout

use std::time::Duration;

use crate::{events::Bus, policies::BackoffPolicy};

/// Default recovery settings for saga steps.
#[derive(Clone, Debug)]
pub struct Config {
    /// Raw retry setting; `<= 0` means unbounded.
    ///
    /// A positive value `n` allows `n + 1` attempts in total.
    pub retries: i32,

    /// Fixed wait after each failed attempt.
    pub retry_delay: Duration,

    /// Optional growing delay replacing `retry_delay`.
    pub backoff: Option<BackoffPolicy>,

    /// Per-attempt timeout; `Duration::ZERO` disables it.
    pub timeout: Duration,

    /// Capacity of the diagnostics bus ring buffer (min 1, clamped by `Bus`).
    pub bus_capacity: usize,
}

impl Config {
    /// Returns the per-attempt timeout as an `Option`.
    #[inline]
    pub fn attempt_timeout(&self) -> Option<Duration> {
        if self.timeout == Duration::ZERO {
            None
        } else {
            Some(self.timeout)
        }
    }

    /// Builds a diagnostics bus sized by `bus_capacity`.
    pub fn bus(&self) -> Bus {
        Bus::new(self.bus_capacity)
    }
}

impl Default for Config {
    /// - `retries = 0` (unbounded)
    /// - `retry_delay = 50ms`
    /// - `backoff = None`
    /// - `timeout = 0s` (none)
    /// - `bus_capacity = 1024`
    fn default() -> Self {
        Self {
            retries: 0,
            retry_delay: Duration::from_millis(50),
            backoff: None,
            timeout: Duration::ZERO,
            bus_capacity: 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_timeout_is_disabled() {
        assert_eq!(Config::default().attempt_timeout(), None);
        let cfg = Config {
            timeout: Duration::from_millis(300),
            ..Config::default()
        };
        assert_eq!(cfg.attempt_timeout(), Some(Duration::from_millis(300)));
    }

    #[test]
    fn default_values_match_docs() {
        let cfg = Config::default();
        assert_eq!(cfg.retries, 0);
        assert_eq!(cfg.retry_delay, Duration::from_millis(50));
        assert!(cfg.backoff.is_none());
        assert_eq!(cfg.timeout, Duration::ZERO);
        assert_eq!(cfg.bus_capacity, 1024);
    }
}
