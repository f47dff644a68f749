//! # Recovery policy abstraction.
//!
//! A [`RecoveryPolicy`] decides what happens when a saga step's action fails.
//! The executor picks one per step (or per saga) when composing the saga and
//! calls [`RecoveryPolicy::apply`]; the policy drives the action and reports
//! either a response or a terminal [`RecoveryError`].
//!
//! Policies are stateless: one instance can serve any number of concurrent
//! `apply` calls. [`RecoveryRef`] is the shared handle executors store.

use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::{
    error::RecoveryError,
    saga::{SagaRequest, SagaResponse, SagaTask},
};

/// Shared handle to a recovery policy.
pub type RecoveryRef = Arc<dyn RecoveryPolicy>;

/// Failure-handling strategy for a saga step.
#[async_trait]
pub trait RecoveryPolicy: Send + Sync + 'static {
    /// Executes `request` for `task`, feeding it `parent`, until the policy
    /// reaches a terminal outcome.
    ///
    /// `cancel` stops the policy at its next suspension point; the call then
    /// returns [`RecoveryError::Failed`].
    async fn apply(
        &self,
        task: &SagaTask,
        request: &SagaRequest,
        parent: &SagaResponse,
        cancel: &CancellationToken,
    ) -> Result<SagaResponse, RecoveryError>;

    /// Stable identifier of the policy variant, used in diagnostics.
    fn description(&self) -> &'static str;
}
