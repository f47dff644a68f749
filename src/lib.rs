//! # saga-recovery
//!
//! Recovery policies for saga step execution.
//!
//! When a remote step of a multi-step business transaction fails, a
//! [`RecoveryPolicy`] decides whether to call it again, how long to wait in
//! between, and which terminal outcome to report once it gives up. The crate
//! ships [`ForwardRecovery`], which retries the same step in place until it
//! succeeds, its retry budget is spent, or the caller cancels it.
//!
//! Step ordering, saga persistence, transport and compensation belong to the
//! executor; this crate only drives a single step.
//!
//! ## Architecture
//! ```text
//!   saga executor
//!        │ apply(task, request, parent, cancel)
//!        ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │  RecoveryPolicy (ForwardRecovery)                            │
//! │                                                              │
//! │   loop {                                                     │
//! │     Action::send(target, parent) ──► Ok  ──► return response │
//! │                                  └─► Err ──► log + event     │
//! │     select!(sleep(delay), cancel) ──► cancelled ──► Failed   │
//! │     budget exhausted?             ──► yes       ──► Aborted  │
//! │   }                                                          │
//! └───────┬──────────────────────────────────────┬───────────────┘
//!         │ tracing records                      │ Event (optional)
//!         ▼                                      ▼
//!   tracing subscriber                    Bus (broadcast) ──► receivers
//! ```
//!
//! ## Outcomes
//! ```text
//! ATTEMPTING ──► SUCCEEDED                       Ok(SagaResponse)
//!      │
//!      └──► WAITING ──► ATTEMPTING ──► ...
//!               ├──► CANCELLED                   Err(RecoveryError::Failed)
//!               └──► ABORTED (budget spent)      Err(RecoveryError::Aborted)
//! ```
//!
//! ## Retry budget
//! The raw setting follows saga definitions: `retries <= 0` retries forever,
//! `retries = n` allows `n + 1` attempts. See [`RetryBudget`].
//!
//! ## Example
//! ```rust
//! use std::{sync::Arc, sync::atomic::{AtomicU32, Ordering}, time::Duration};
//! use tokio_util::sync::CancellationToken;
//! use saga_recovery::{
//!     ActionError, ActionFn, ActionRef, ForwardRecovery, RecoveryPolicy, RecoveryRef,
//!     SagaRequest, SagaResponse, SagaTask,
//! };
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let calls = Arc::new(AtomicU32::new(0));
//! let reserve: ActionRef = ActionFn::arc("reserve", {
//!     let calls = calls.clone();
//!     move |_: Arc<str>, _: SagaResponse| {
//!         let n = calls.fetch_add(1, Ordering::SeqCst);
//!         async move {
//!             if n < 2 {
//!                 Err(ActionError::fail("inventory busy"))
//!             } else {
//!                 Ok(SagaResponse::new("reserved"))
//!             }
//!         }
//!     }
//! });
//!
//! let policy: RecoveryRef = Arc::new(ForwardRecovery::new());
//! let request = SagaRequest::new("req-1", "inventory", reserve, 2, Duration::from_millis(1));
//! let out = policy
//!     .apply(
//!         &SagaTask::new("step-1", "reserve"),
//!         &request,
//!         &SagaResponse::empty(),
//!         &CancellationToken::new(),
//!     )
//!     .await;
//!
//! assert_eq!(out.unwrap().body(), "reserved");
//! assert_eq!(calls.load(Ordering::SeqCst), 3);
//! # }
//! ```

mod config;
mod error;
mod events;
mod os_signals;
mod policies;
mod saga;

pub use config::Config;
pub use error::{ActionError, RecoveryError};
pub use events::{Bus, Event, EventKind};
pub use os_signals::{cancel_on_shutdown, wait_for_shutdown_signal};
pub use policies::{BackoffPolicy, ForwardRecovery, JitterPolicy, RecoveryPolicy, RecoveryRef};
pub use saga::{Action, ActionFn, ActionRef, RetryBudget, SagaRequest, SagaResponse, SagaTask};
