//! Recovery policies and the delay knobs they read.
//!
//! ## Contents
//! - [`RecoveryPolicy`] / [`RecoveryRef`] the strategy interface executors hold
//! - [`ForwardRecovery`] retry the failing step in place
//! - [`BackoffPolicy`] optional growing delay (fixed delay when absent)
//! - [`JitterPolicy`] randomization on top of a backoff delay
//!
//! ## Quick wiring
//! ```text
//! SagaRequest { budget, retry_delay, backoff: Option<BackoffPolicy>, timeout }
//!      └─► ForwardRecovery::apply uses:
//!           - budget.allows(attempt) to decide continue/abort
//!           - request.delay_for(attempt) to size the cancellable wait
//! ```
//!
//! ## Defaults
//! - No backoff: the request's fixed `retry_delay` is used for every wait.
//! - `JitterPolicy::None`.

mod backoff;
mod forward;
mod jitter;
mod recovery;

pub use backoff::BackoffPolicy;
pub use forward::ForwardRecovery;
pub use jitter::JitterPolicy;
pub use recovery::{RecoveryPolicy, RecoveryRef};
