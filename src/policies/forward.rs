//! # Forward recovery: retry the failing step in place.
//!
//! [`ForwardRecovery`] keeps invoking the same action until it succeeds, the
//! request's [`RetryBudget`](crate::RetryBudget) runs out, or the caller's
//! [`CancellationToken`] fires while waiting between attempts.
//!
//! ## Attempt loop
//! ```text
//! attempt = 0
//! loop {
//!   ├─► publish AttemptStarting{ attempt }
//!   ├─► action.send(target, parent)      (bounded by request timeout, if any)
//!   │       ├─ Ok(resp) ──► publish StepSucceeded ──► return Ok(resp)
//!   │       └─ Err(e)   ──► log + publish AttemptFailed
//!   ├─► delay = request.delay_for(attempt)
//!   ├─► publish RetryScheduled{ delay }
//!   ├─► select! (biased)
//!   │       ├─ cancel.cancelled() ──► publish StepCancelled ──► Err(Failed)
//!   │       └─ sleep(delay)
//!   ├─► attempt += 1
//!   └─► !budget.allows(attempt) ──► publish StepAborted ──► Err(Aborted)
//! }
//! ```
//!
//! ## Rules
//! - Attempts are strictly sequential; nothing is spawned.
//! - Every action error is retryable; the variant is only reported.
//! - The wait follows every failed attempt, including the last one.
//! - Cancellation is observed only while waiting and wins ties with the timer.
//! - No attempt starts after cancellation has been observed.

use std::sync::Arc;

use tokio::{select, time};
use tokio_util::sync::CancellationToken;

use async_trait::async_trait;

use crate::{
    error::{ActionError, RecoveryError},
    events::{Bus, Event, EventKind},
    policies::recovery::RecoveryPolicy,
    saga::{SagaRequest, SagaResponse, SagaTask},
};

const DESCRIPTION: &str = "ForwardRecovery";

/// Retries a step in place until success, budget exhaustion or cancellation.
///
/// Holds no per-call state; clone it or share it behind an `Arc` freely.
///
/// ## Example
/// ```rust
/// use std::{sync::Arc, time::Duration};
/// use tokio_util::sync::CancellationToken;
/// use saga_recovery::{
///     ActionError, ActionFn, ActionRef, ForwardRecovery, RecoveryPolicy, SagaRequest,
///     SagaResponse, SagaTask,
/// };
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let ship: ActionRef = ActionFn::arc("ship", |_: Arc<str>, _: SagaResponse| async {
///     Ok::<_, ActionError>(SagaResponse::new("shipped"))
/// });
/// let request = SagaRequest::new("req-1", "courier", ship, 2, Duration::from_millis(10));
///
/// let out = ForwardRecovery::new()
///     .apply(
///         &SagaTask::new("t-1", "ship"),
///         &request,
///         &SagaResponse::empty(),
///         &CancellationToken::new(),
///     )
///     .await;
/// assert_eq!(out.unwrap().body(), "shipped");
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct ForwardRecovery {
    bus: Option<Bus>,
}

impl ForwardRecovery {
    /// Policy that reports through `tracing` only.
    pub fn new() -> Self {
        Self { bus: None }
    }

    /// Policy that also publishes lifecycle [`Event`]s to `bus`.
    pub fn with_bus(bus: Bus) -> Self {
        Self { bus: Some(bus) }
    }

    /// Builds an event only when a bus is attached.
    fn event(
        &self,
        kind: EventKind,
        task: &SagaTask,
        request: &SagaRequest,
        attempt: u64,
    ) -> Option<Event> {
        self.bus.as_ref().map(|_| {
            Event::new(kind)
                .with_task(task.id_arc())
                .with_target(request.target_arc())
                .with_policy(DESCRIPTION)
                .with_attempt(attempt)
        })
    }

    fn emit(&self, ev: Option<Event>) {
        if let (Some(bus), Some(ev)) = (&self.bus, ev) {
            bus.publish(ev);
        }
    }
}

/// Runs one attempt, mapping an elapsed per-attempt timeout to [`ActionError::Timeout`].
async fn send_once(
    request: &SagaRequest,
    parent: &SagaResponse,
) -> Result<SagaResponse, ActionError> {
    let send = request.action().send(request.target(), parent);
    match request.timeout() {
        Some(timeout) => match time::timeout(timeout, send).await {
            Ok(res) => res,
            Err(_elapsed) => Err(ActionError::Timeout { timeout }),
        },
        None => send.await,
    }
}

#[async_trait]
impl RecoveryPolicy for ForwardRecovery {
    async fn apply(
        &self,
        task: &SagaTask,
        request: &SagaRequest,
        parent: &SagaResponse,
        cancel: &CancellationToken,
    ) -> Result<SagaResponse, RecoveryError> {
        let budget = request.budget();
        let transaction = request.action().name();
        let mut attempt: u64 = 0;

        loop {
            self.emit(self.event(EventKind::AttemptStarting, task, request, attempt));

            let err = match send_once(request, parent).await {
                Ok(response) => {
                    if attempt > 0 {
                        tracing::info!(
                            step = %task,
                            service = request.target(),
                            transaction,
                            attempts = attempt + 1,
                            "transaction recovered by {DESCRIPTION}"
                        );
                    }
                    self.emit(self.event(EventKind::StepSucceeded, task, request, attempt));
                    return Ok(response);
                }
                Err(err) => err,
            };

            tracing::error!(
                step = %task,
                service = request.target(),
                transaction,
                policy = DESCRIPTION,
                attempt,
                error = %err,
                "applying {DESCRIPTION} policy due to failure in transaction {transaction} of service {}",
                request.target()
            );
            self.emit(
                self.event(EventKind::AttemptFailed, task, request, attempt)
                    .map(|ev| ev.with_reason(err.to_string())),
            );

            let delay = request.delay_for(attempt);
            tracing::debug!(step = %task, attempt, ?delay, "waiting before next attempt");
            self.emit(
                self.event(EventKind::RetryScheduled, task, request, attempt)
                    .map(|ev| ev.with_delay(delay)),
            );

            let sleep = time::sleep(delay);
            tokio::pin!(sleep);
            select! {
                biased;
                _ = cancel.cancelled() => {
                    let attempts = attempt + 1;
                    tracing::warn!(
                        step = %task,
                        service = request.target(),
                        transaction,
                        policy = DESCRIPTION,
                        attempts,
                        "applying {DESCRIPTION} interrupted in transaction {transaction} of service {}",
                        request.target()
                    );
                    self.emit(self.event(EventKind::StepCancelled, task, request, attempts));
                    return Err(RecoveryError::Failed {
                        task: task.id_arc(),
                        transaction: Arc::from(transaction),
                        target: request.target_arc(),
                        attempts,
                    });
                }
                _ = &mut sleep => {}
            }

            attempt += 1;
            if !budget.allows(attempt) {
                tracing::error!(
                    step = %task,
                    service = request.target(),
                    transaction,
                    attempts = attempt,
                    "too many failures in transaction {transaction} of service {}, abort the transaction",
                    request.target()
                );
                self.emit(
                    self.event(EventKind::StepAborted, task, request, attempt)
                        .map(|ev| ev.with_reason(err.to_string())),
                );
                return Err(RecoveryError::Aborted {
                    task: task.id_arc(),
                    transaction: Arc::from(transaction),
                    target: request.target_arc(),
                    attempts: attempt,
                    last_error: err,
                });
            }
        }
    }

    fn description(&self) -> &'static str {
        DESCRIPTION
    }
}
