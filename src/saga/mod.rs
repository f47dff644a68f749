//! # Saga step model.
//!
//! The types a recovery policy receives from the executor:
//! - [`SagaTask`] - identity of the step (diagnostics only)
//! - [`SagaRequest`] - target, action and retry knobs of the step
//! - [`Action`] / [`ActionFn`] / [`ActionRef`] - the remote effect
//! - [`SagaResponse`] - opaque result forwarded between steps

mod action;
mod request;
mod response;
mod task;

pub use action::{Action, ActionFn, ActionRef};
pub use request::{RetryBudget, SagaRequest};
pub use response::SagaResponse;
pub use task::SagaTask;
