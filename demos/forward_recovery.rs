//! # Example: forward_recovery
//!
//! Runs two saga steps through one shared [`ForwardRecovery`] policy:
//! - `reserve` fails twice, then succeeds (recovered in place);
//! - `charge` never succeeds and is aborted once its budget is spent.
//!
//! Events from the policy are printed from a bus receiver, and Ctrl-C cancels
//! any step that is still waiting between attempts.
//!
//! ## Flow
//! ```text
//! reserve: attempt 0 ✗ ─ 200ms ─ attempt 1 ✗ ─ 200ms ─ attempt 2 ✓ ──► Ok
//! charge:  attempt 0 ✗ ─ 100ms ─ attempt 1 ✗ ─ 200ms ─ ...  ✗       ──► Aborted
//! ```
//!
//! ## Run
//! ```bash
//! RUST_LOG=saga_recovery=debug cargo run --example forward_recovery
//! ```

use std::{
    sync::{
        Arc,
        atomic::{AtomicU32, Ordering},
    },
    time::Duration,
};

use saga_recovery::{
    ActionError, ActionFn, ActionRef, BackoffPolicy, Config, EventKind, ForwardRecovery,
    JitterPolicy, RecoveryRef, SagaRequest, SagaResponse, SagaTask, cancel_on_shutdown,
};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // 1. Defaults: 3 retries, 200ms fixed delay.
    let cfg = Config {
        retries: 3,
        retry_delay: Duration::from_millis(200),
        ..Config::default()
    };

    // 2. One policy for the whole saga, publishing to a bus.
    let bus = cfg.bus();
    let mut rx = bus.subscribe();
    let policy: RecoveryRef = Arc::new(ForwardRecovery::with_bus(bus));

    let printer = tokio::spawn(async move {
        while let Ok(ev) = rx.recv().await {
            match ev.kind {
                EventKind::AttemptFailed => println!(
                    "[failed] step={:?} attempt={:?} err={:?}",
                    ev.task, ev.attempt, ev.reason
                ),
                EventKind::RetryScheduled => println!(
                    "[waiting] step={:?} delay_ms={:?}",
                    ev.task, ev.delay_ms
                ),
                EventKind::StepSucceeded => println!("[succeeded] step={:?}", ev.task),
                EventKind::StepAborted => println!("[aborted] step={:?}", ev.task),
                EventKind::StepCancelled => println!("[cancelled] step={:?}", ev.task),
                EventKind::AttemptStarting => {}
            }
        }
    });

    // 3. Ctrl-C turns pending waits into TransactionFailed.
    let cancel = CancellationToken::new();
    let _watcher = cancel_on_shutdown(cancel.clone());

    // 4. Steps.
    let reserve_calls = Arc::new(AtomicU32::new(0));
    let reserve: ActionRef = ActionFn::arc("reserve", {
        let calls = reserve_calls.clone();
        move |target: Arc<str>, input: SagaResponse| {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(ActionError::fail(format!("{target} busy")))
                } else {
                    Ok(SagaResponse::new(format!("reserved for {}", input.body())))
                }
            }
        }
    });
    let charge: ActionRef = ActionFn::arc("charge", |target: Arc<str>, _: SagaResponse| async move {
        Err::<SagaResponse, _>(ActionError::fail(format!("{target} declined")))
    });

    let reserve_req = SagaRequest::with_defaults("req-1", "inventory", reserve, &cfg);
    let charge_req = SagaRequest::with_defaults("req-2", "payment", charge, &cfg).with_backoff(Some(
        BackoffPolicy::exponential(Duration::from_millis(100), 2.0, Duration::from_secs(1))
            .with_jitter(JitterPolicy::Equal),
    ));

    // 5. Run the steps.
    let order = SagaResponse::new("order-42");
    let reserved = policy
        .apply(&SagaTask::new("step-1", "reserve"), &reserve_req, &order, &cancel)
        .await?;
    println!("reserve -> {reserved}");

    match policy
        .apply(&SagaTask::new("step-2", "charge"), &charge_req, &reserved, &cancel)
        .await
    {
        Ok(resp) => println!("charge -> {resp}"),
        Err(err) => println!("charge gave up: {} ({})", err, err.as_label()),
    }

    // Dropping the last policy closes the bus, which ends the printer.
    drop(policy);
    printer.await?;
    Ok(())
}
