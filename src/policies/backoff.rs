//! # Optional backoff between forward-recovery attempts.
//!
//! Forward recovery waits a fixed delay between attempts unless the request
//! carries a [`BackoffPolicy`]. A policy computes the wait after failed
//! attempt `n` (0-indexed) as `first × factor^n`, clamped to `max`, then
//! applies [`JitterPolicy`]. The base is derived from `n` alone, so jitter never
//! compounds across attempts.
//!
//! # Example
//! ```rust
//! use std::time::Duration;
//! use saga_recovery::{BackoffPolicy, JitterPolicy};
//!
//! let backoff = BackoffPolicy {
//!     first: Duration::from_millis(50),
//!     max: Duration::from_secs(1),
//!     factor: 2.0,
//!     jitter: JitterPolicy::None,
//! };
//! assert_eq!(backoff.delay_for(0), Duration::from_millis(50));
//! assert_eq!(backoff.delay_for(2), Duration::from_millis(200));
//! assert_eq!(backoff.delay_for(30), Duration::from_secs(1));
//!
//! let fixed = BackoffPolicy::fixed(Duration::from_millis(10));
//! assert_eq!(fixed.delay_for(7), Duration::from_millis(10));
//! ```

use std::time::Duration;

use crate::policies::jitter::JitterPolicy;

/// Growth of the wait between attempts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackoffPolicy {
    /// Wait after the first failed attempt.
    pub first: Duration,
    /// Upper bound for any single wait (before jitter).
    pub max: Duration,
    /// Multiplicative growth per failed attempt (`1.0` = constant).
    pub factor: f64,
    /// Randomization applied to the clamped delay.
    pub jitter: JitterPolicy,
}

impl BackoffPolicy {
    /// Constant `delay` on every attempt, no jitter.
    pub fn fixed(delay: Duration) -> Self {
        Self {
            first: delay,
            max: delay,
            factor: 1.0,
            jitter: JitterPolicy::None,
        }
    }

    /// Exponential growth from `first` by `factor`, capped at `max`.
    pub fn exponential(first: Duration, factor: f64, max: Duration) -> Self {
        Self {
            first,
            max,
            factor,
            jitter: JitterPolicy::None,
        }
    }

    /// Returns a copy with the given jitter.
    pub fn with_jitter(mut self, jitter: JitterPolicy) -> Self {
        self.jitter = jitter;
        self
    }

    /// Wait after failed attempt `attempt` (0-indexed).
    ///
    /// Non-finite or negative intermediate values fall back to `max`.
    pub fn delay_for(&self, attempt: u64) -> Duration {
        let exp = i32::try_from(attempt).unwrap_or(i32::MAX);
        let secs = self.first.as_secs_f64() * self.factor.powi(exp);

        let base = if !secs.is_finite() || secs < 0.0 || secs > self.max.as_secs_f64() {
            self.max
        } else {
            Duration::from_secs_f64(secs)
        };
        self.jitter.apply(base)
    }
}
