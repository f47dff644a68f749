//! Error types used by recovery policies and the actions they drive.
//!
//! This module defines two enums:
//!
//! - [`ActionError`] — a failure of a single attempt of a step's action.
//!   Always transient from the policy's point of view: it is logged and retried.
//! - [`RecoveryError`] — a terminal outcome of [`RecoveryPolicy::apply`](crate::RecoveryPolicy::apply).
//!   Only these escape a policy.
//!
//! Both provide `as_label` / `as_message` helpers for logs and metrics.

use std::{sync::Arc, time::Duration};
use thiserror::Error;

/// # Failure of a single action attempt.
///
/// Recovery policies never inspect the variant to decide whether to retry:
/// every attempt failure is treated as retryable. The variants exist so that
/// diagnostics can tell a business rejection from an elapsed attempt timeout.
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum ActionError {
    /// The remote call failed (transport error, business rejection, ...).
    #[error("transaction failed: {reason}")]
    Fail {
        /// The underlying error message.
        reason: String,
    },

    /// The attempt exceeded the request's per-attempt timeout.
    #[error("timed out after {timeout:?}")]
    Timeout {
        /// The configured per-attempt timeout.
        timeout: Duration,
    },
}

impl ActionError {
    /// Shorthand for [`ActionError::Fail`].
    pub fn fail(reason: impl Into<String>) -> Self {
        ActionError::Fail {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use saga_recovery::ActionError;
    ///
    /// assert_eq!(ActionError::fail("refused").as_label(), "action_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ActionError::Fail { .. } => "action_failed",
            ActionError::Timeout { .. } => "action_timeout",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ActionError::Fail { reason } => format!("error: {reason}"),
            ActionError::Timeout { timeout } => format!("timeout: {timeout:?}"),
        }
    }
}

/// # Terminal outcome of a recovery policy.
///
/// A call to `apply` yields either a response or exactly one of these.
/// The executor is expected to drive the saga towards compensation on
/// [`RecoveryError::Aborted`] and to stop on [`RecoveryError::Failed`].
#[non_exhaustive]
#[derive(Error, Debug, Clone)]
pub enum RecoveryError {
    /// The retry budget was spent without a successful attempt.
    #[error(
        "too many failures in transaction {transaction} of service {target}, abort the transaction"
    )]
    Aborted {
        /// Step that was being executed.
        task: Arc<str>,
        /// Name of the action that kept failing.
        transaction: Arc<str>,
        /// Target service of the step.
        target: Arc<str>,
        /// Number of attempts made before giving up.
        attempts: u64,
        /// Error of the last attempt.
        #[source]
        last_error: ActionError,
    },

    /// The wait between attempts was cancelled.
    #[error("recovery of transaction {transaction} of service {target} was cancelled")]
    Failed {
        /// Step that was being executed.
        task: Arc<str>,
        /// Name of the action being retried.
        transaction: Arc<str>,
        /// Target service of the step.
        target: Arc<str>,
        /// Number of attempts made before cancellation was observed.
        attempts: u64,
    },
}

impl RecoveryError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use saga_recovery::{ActionError, RecoveryError};
    ///
    /// let err = RecoveryError::Aborted {
    ///     task: "step-1".into(),
    ///     transaction: "reserve".into(),
    ///     target: "inventory".into(),
    ///     attempts: 3,
    ///     last_error: ActionError::fail("out of stock"),
    /// };
    /// assert_eq!(err.as_label(), "transaction_aborted");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RecoveryError::Aborted { .. } => "transaction_aborted",
            RecoveryError::Failed { .. } => "transaction_failed",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RecoveryError::Aborted {
                task,
                target,
                attempts,
                last_error,
                ..
            } => format!(
                "aborted {task}@{target} after {attempts} attempt(s); last {}",
                last_error.as_message()
            ),
            RecoveryError::Failed {
                task,
                target,
                attempts,
                ..
            } => format!("cancelled {task}@{target} after {attempts} attempt(s)"),
        }
    }

    /// `true` when the retry budget was exhausted.
    pub fn is_aborted(&self) -> bool {
        matches!(self, RecoveryError::Aborted { .. })
    }

    /// `true` when recovery was stopped by cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, RecoveryError::Failed { .. })
    }

    /// Target service named by the error.
    pub fn target(&self) -> &str {
        match self {
            RecoveryError::Aborted { target, .. } | RecoveryError::Failed { target, .. } => target,
        }
    }

    /// Name of the action the error refers to.
    pub fn transaction(&self) -> &str {
        match self {
            RecoveryError::Aborted { transaction, .. }
            | RecoveryError::Failed { transaction, .. } => transaction,
        }
    }

    /// Attempts made before the terminal outcome.
    pub fn attempts(&self) -> u64 {
        match self {
            RecoveryError::Aborted { attempts, .. } | RecoveryError::Failed { attempts, .. } => {
                *attempts
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aborted_message_names_transaction_and_target() {
        let err = RecoveryError::Aborted {
            task: "step-1".into(),
            transaction: "reserve".into(),
            target: "inventory".into(),
            attempts: 3,
            last_error: ActionError::fail("boom"),
        };
        assert_eq!(
            err.to_string(),
            "too many failures in transaction reserve of service inventory, abort the transaction"
        );
        assert!(err.is_aborted());
        assert!(!err.is_cancelled());
        assert_eq!(err.target(), "inventory");
        assert_eq!(err.transaction(), "reserve");
        assert_eq!(err.attempts(), 3);
    }

    #[test]
    fn aborted_exposes_last_error_as_source() {
        use std::error::Error as _;

        let err = RecoveryError::Aborted {
            task: "t".into(),
            transaction: "a".into(),
            target: "s".into(),
            attempts: 1,
            last_error: ActionError::Timeout {
                timeout: Duration::from_millis(5),
            },
        };
        let source = err.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("timed out after 5ms"));
    }

    #[test]
    fn failed_is_distinct_from_aborted() {
        let err = RecoveryError::Failed {
            task: "ship".into(),
            transaction: "dispatch".into(),
            target: "courier".into(),
            attempts: 2,
        };
        assert_eq!(
            err.to_string(),
            "recovery of transaction dispatch of service courier was cancelled"
        );
        assert!(err.is_cancelled());
        assert!(!err.is_aborted());
        assert_eq!(err.as_label(), "transaction_failed");
        assert_eq!(err.as_message(), "cancelled ship@courier after 2 attempt(s)");
    }

    #[test]
    fn action_error_labels() {
        let t = ActionError::Timeout {
            timeout: Duration::from_secs(1),
        };
        assert_eq!(t.as_label(), "action_timeout");
        assert_eq!(ActionError::fail("x").as_message(), "error: x");
    }
}
