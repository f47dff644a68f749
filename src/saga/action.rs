//! # Step actions.
//!
//! [`Action`] is the collaborator that actually performs a step's effect
//! against a remote service. Recovery policies call it once per attempt and
//! never look inside. [`ActionFn`] wraps a closure, producing a fresh future
//! per attempt; [`ActionRef`] is the shared handle stored in requests.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use saga_recovery::{ActionError, ActionFn, ActionRef, SagaResponse};
//!
//! let reserve: ActionRef = ActionFn::arc("reserve", |target: Arc<str>, input: SagaResponse| async move {
//!     if target.is_empty() {
//!         return Err(ActionError::fail("no target"));
//!     }
//!     Ok(SagaResponse::new(format!("reserved after {}", input.body())))
//! });
//!
//! assert_eq!(reserve.name(), "reserve");
//! ```

use std::{borrow::Cow, future::Future, sync::Arc};

use async_trait::async_trait;

use crate::{error::ActionError, saga::response::SagaResponse};

/// Shared handle to an action.
pub type ActionRef = Arc<dyn Action>;

/// # Remote effect of a saga step.
///
/// `send` may fail for any reason; every failure is retryable from the
/// policy's perspective. Implementations must tolerate being invoked several
/// times with the same input.
#[async_trait]
pub trait Action: Send + Sync + 'static {
    /// Stable name of the transaction, used in diagnostics.
    fn name(&self) -> &str;

    /// Performs the effect against `target`, given the previous step's response.
    async fn send(&self, target: &str, input: &SagaResponse) -> Result<SagaResponse, ActionError>;
}

/// Closure-backed action.
///
/// The closure receives owned copies of the target and input so the returned
/// future can be `'static`.
#[derive(Debug)]
pub struct ActionFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ActionFn<F> {
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the action and returns it as an [`ActionRef`]-compatible handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F, Fut> Action for ActionFn<F>
where
    F: Fn(Arc<str>, SagaResponse) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<SagaResponse, ActionError>> + Send + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    async fn send(&self, target: &str, input: &SagaResponse) -> Result<SagaResponse, ActionError> {
        (self.f)(Arc::from(target), input.clone()).await
    }
}
