//! # Recovery diagnostics events.
//!
//! [`EventKind`] classifies what happened inside one `apply` call; [`Event`]
//! carries the step/target identity and attempt metadata.
//!
//! ## Ordering guarantees
//! Every event gets a process-wide, monotonically increasing `seq`. Events of
//! one `apply` call are published in program order; events of concurrent calls
//! interleave and can be told apart by `task`.
//!
//! ## Example
//! ```rust
//! use std::time::Duration;
//! use saga_recovery::{Event, EventKind};
//!
//! let ev = Event::new(EventKind::RetryScheduled)
//!     .with_task("reserve")
//!     .with_target("inventory")
//!     .with_attempt(1)
//!     .with_delay(Duration::from_millis(10));
//!
//! assert_eq!(ev.kind, EventKind::RetryScheduled);
//! assert_eq!(ev.delay_ms, Some(10));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::{Duration, SystemTime};

static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of recovery events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// An attempt is about to invoke the action.
    ///
    /// Sets: `task`, `target`, `policy`, `attempt` (0-based)
    AttemptStarting,

    /// The action failed for this attempt.
    ///
    /// Sets: `task`, `target`, `policy`, `attempt`, `reason`
    AttemptFailed,

    /// Waiting before the next attempt.
    ///
    /// Sets: `task`, `target`, `policy`, `attempt` (the failed one), `delay_ms`
    RetryScheduled,

    /// An attempt succeeded, on the first try or after retries; `apply`
    /// returns its response.
    ///
    /// Sets: `task`, `target`, `policy`, `attempt`
    StepSucceeded,

    /// Retry budget exhausted; `apply` returns `RecoveryError::Aborted`.
    ///
    /// Sets: `task`, `target`, `policy`, `attempt` (attempts made), `reason`
    StepAborted,

    /// Cancelled while waiting; `apply` returns `RecoveryError::Failed`.
    ///
    /// Sets: `task`, `target`, `policy`, `attempt` (attempts made)
    StepCancelled,
}

impl EventKind {
    /// `true` for the three kinds that end an `apply` call.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            EventKind::StepSucceeded | EventKind::StepAborted | EventKind::StepCancelled
        )
    }
}

/// Recovery event with optional metadata.
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Step identifier.
    pub task: Option<Arc<str>>,
    /// Target service.
    pub target: Option<Arc<str>>,
    /// Description of the policy that emitted the event.
    pub policy: Option<&'static str>,
    /// Attempt index or count, see [`EventKind`].
    pub attempt: Option<u64>,
    /// Scheduled delay in milliseconds (compact).
    pub delay_ms: Option<u32>,
    /// Failure message.
    pub reason: Option<Arc<str>>,
}

impl Event {
    /// Creates an event with the current timestamp and the next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            task: None,
            target: None,
            policy: None,
            attempt: None,
            delay_ms: None,
            reason: None,
        }
    }

    #[inline]
    pub fn with_task(mut self, task: impl Into<Arc<str>>) -> Self {
        self.task = Some(task.into());
        self
    }

    #[inline]
    pub fn with_target(mut self, target: impl Into<Arc<str>>) -> Self {
        self.target = Some(target.into());
        self
    }

    #[inline]
    pub fn with_policy(mut self, policy: &'static str) -> Self {
        self.policy = Some(policy);
        self
    }

    #[inline]
    pub fn with_attempt(mut self, attempt: u64) -> Self {
        self.attempt = Some(attempt);
        self
    }

    /// Attaches a delay (stored as milliseconds, saturating at `u32::MAX`).
    #[inline]
    pub fn with_delay(mut self, d: Duration) -> Self {
        let ms = d.as_millis().min(u128::from(u32::MAX)) as u32;
        self.delay_ms = Some(ms);
        self
    }

    #[inline]
    pub fn with_reason(mut self, reason: impl Into<Arc<str>>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}
