//! # Step requests.
//!
//! [`SagaRequest`] describes one step to execute: which service to call, the
//! [`Action`](crate::Action) that calls it, and the knobs forward recovery reads
//! (retry budget, retry delay, optional backoff and per-attempt timeout).
//!
//! A request can be created:
//! - **Explicitly** with [`SagaRequest::new`]
//! - **From config** with [`SagaRequest::with_defaults`]
//!
//! ## Retry budget
//! The raw integer setting follows the saga definition format: `retries <= 0`
//! means retry forever, `retries = n > 0` means up to `n` retries **after** the
//! first attempt, i.e. `n + 1` attempts in total. `RetryBudget::Limited(0)`
//! is only reachable through [`SagaRequest::with_budget`] and gives a single
//! attempt.

use std::{fmt, sync::Arc, time::Duration};

use crate::{config::Config, policies::BackoffPolicy, saga::action::ActionRef};

/// How many attempts a step may make.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RetryBudget {
    /// Retry until success or cancellation.
    #[default]
    Unbounded,
    /// Retry at most `n` times after the first attempt.
    Limited(u32),
}

impl RetryBudget {
    /// Maps the raw integer setting (`<= 0` = unbounded).
    ///
    /// ```
    /// use saga_recovery::RetryBudget;
    ///
    /// assert_eq!(RetryBudget::from_retries(0), RetryBudget::Unbounded);
    /// assert_eq!(RetryBudget::from_retries(-3), RetryBudget::Unbounded);
    /// assert_eq!(RetryBudget::from_retries(2), RetryBudget::Limited(2));
    /// ```
    pub fn from_retries(retries: i32) -> Self {
        match u32::try_from(retries) {
            Ok(n) if n > 0 => RetryBudget::Limited(n),
            _ => RetryBudget::Unbounded,
        }
    }

    /// Whether attempt number `attempt` (0 = first try) may run.
    ///
    /// The comparison is inclusive, so `Limited(n)` admits attempts `0..=n`.
    #[inline]
    pub fn allows(&self, attempt: u64) -> bool {
        match self {
            RetryBudget::Unbounded => true,
            RetryBudget::Limited(n) => attempt <= u64::from(*n),
        }
    }

    /// Total attempts before giving up (`None` = unbounded).
    pub fn max_attempts(&self) -> Option<u64> {
        match self {
            RetryBudget::Unbounded => None,
            RetryBudget::Limited(n) => Some(u64::from(*n) + 1),
        }
    }
}

/// Immutable description of a saga step.
///
/// ## Example
/// ```rust
/// use std::{sync::Arc, time::Duration};
/// use saga_recovery::{ActionFn, ActionRef, RetryBudget, SagaRequest, SagaResponse, ActionError};
///
/// let pay: ActionRef = ActionFn::arc("pay", |_: Arc<str>, _: SagaResponse| async {
///     Ok::<_, ActionError>(SagaResponse::new("paid"))
/// });
///
/// let req = SagaRequest::new("req-1", "payment", pay, 3, Duration::from_millis(10));
/// assert_eq!(req.budget(), RetryBudget::Limited(3));
/// assert_eq!(req.delay_for(5), Duration::from_millis(10));
/// ```
#[derive(Clone)]
pub struct SagaRequest {
    id: Arc<str>,
    target: Arc<str>,
    action: ActionRef,
    budget: RetryBudget,
    retry_delay: Duration,
    backoff: Option<BackoffPolicy>,
    timeout: Option<Duration>,
}

impl SagaRequest {
    /// Creates a request with a fixed retry delay.
    ///
    /// ### Parameters
    /// - `id`: request identifier within the saga
    /// - `target`: service the action talks to
    /// - `action`: the effect to perform
    /// - `retries`: raw retry setting (`<= 0` = unbounded)
    /// - `retry_delay`: wait after each failed attempt
    pub fn new(
        id: impl Into<Arc<str>>,
        target: impl Into<Arc<str>>,
        action: ActionRef,
        retries: i32,
        retry_delay: Duration,
    ) -> Self {
        Self {
            id: id.into(),
            target: target.into(),
            action,
            budget: RetryBudget::from_retries(retries),
            retry_delay,
            backoff: None,
            timeout: None,
        }
    }

    /// Creates a request inheriting retry settings from `cfg`.
    pub fn with_defaults(
        id: impl Into<Arc<str>>,
        target: impl Into<Arc<str>>,
        action: ActionRef,
        cfg: &Config,
    ) -> Self {
        Self {
            id: id.into(),
            target: target.into(),
            action,
            budget: RetryBudget::from_retries(cfg.retries),
            retry_delay: cfg.retry_delay,
            backoff: cfg.backoff,
            timeout: cfg.attempt_timeout(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Service the action is sent to.
    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn action(&self) -> &ActionRef {
        &self.action
    }

    pub fn budget(&self) -> RetryBudget {
        self.budget
    }

    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    pub fn backoff(&self) -> Option<BackoffPolicy> {
        self.backoff
    }

    /// Per-attempt timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Wait after failed attempt `attempt` (0-indexed).
    ///
    /// Uses the backoff policy when one is set, the fixed retry delay otherwise.
    pub fn delay_for(&self, attempt: u64) -> Duration {
        match &self.backoff {
            Some(backoff) => backoff.delay_for(attempt),
            None => self.retry_delay,
        }
    }

    /// Returns a new request with the given budget.
    pub fn with_budget(mut self, budget: RetryBudget) -> Self {
        self.budget = budget;
        self
    }

    /// Returns a new request with updated backoff (`None` = fixed delay).
    pub fn with_backoff(mut self, backoff: Option<BackoffPolicy>) -> Self {
        self.backoff = backoff;
        self
    }

    /// Returns a new request with updated per-attempt timeout.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout.filter(|d| *d > Duration::ZERO);
        self
    }

    pub(crate) fn target_arc(&self) -> Arc<str> {
        Arc::clone(&self.target)
    }
}

impl fmt::Debug for SagaRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SagaRequest")
            .field("id", &self.id)
            .field("target", &self.target)
            .field("action", &self.action.name())
            .field("budget", &self.budget)
            .field("retry_delay", &self.retry_delay)
            .field("backoff", &self.backoff)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActionError, ActionFn, JitterPolicy, SagaResponse};

    fn noop() -> ActionRef {
        ActionFn::arc("noop", |_: Arc<str>, _: SagaResponse| async {
            Ok::<_, ActionError>(SagaResponse::empty())
        })
    }

    #[test]
    fn limited_budget_admits_retries_plus_one() {
        let b = RetryBudget::Limited(2);
        assert!(b.allows(0));
        assert!(b.allows(2));
        assert!(!b.allows(3));
        assert_eq!(b.max_attempts(), Some(3));
    }

    #[test]
    fn limited_zero_is_single_attempt() {
        let b = RetryBudget::Limited(0);
        assert!(b.allows(0));
        assert!(!b.allows(1));
        assert_eq!(b.max_attempts(), Some(1));
    }

    #[test]
    fn unbounded_allows_everything() {
        assert!(RetryBudget::Unbounded.allows(u64::MAX));
        assert_eq!(RetryBudget::Unbounded.max_attempts(), None);
    }

    #[test]
    fn defaults_come_from_config() {
        let cfg = Config {
            retries: 4,
            retry_delay: Duration::from_millis(7),
            timeout: Duration::from_secs(2),
            ..Config::default()
        };
        let req = SagaRequest::with_defaults("r", "svc", noop(), &cfg);
        assert_eq!(req.budget(), RetryBudget::Limited(4));
        assert_eq!(req.retry_delay(), Duration::from_millis(7));
        assert_eq!(req.timeout(), Some(Duration::from_secs(2)));
        assert!(req.backoff().is_none());
    }

    #[test]
    fn backoff_overrides_fixed_delay() {
        let backoff = BackoffPolicy::exponential(
            Duration::from_millis(10),
            2.0,
            Duration::from_secs(1),
        )
        .with_jitter(JitterPolicy::None);
        let req = SagaRequest::new("r", "svc", noop(), 5, Duration::from_millis(500))
            .with_backoff(Some(backoff));
        assert_eq!(req.delay_for(0), Duration::from_millis(10));
        assert_eq!(req.delay_for(2), Duration::from_millis(40));
    }

    #[test]
    fn zero_timeout_means_none() {
        let req = SagaRequest::new("r", "svc", noop(), 1, Duration::ZERO)
            .with_timeout(Some(Duration::ZERO));
        assert!(req.timeout().is_none());
    }

    #[test]
    fn debug_shows_action_name() {
        let req = SagaRequest::new("r", "svc", noop(), 1, Duration::ZERO);
        assert!(format!("{req:?}").contains("\"noop\""));
    }
}
