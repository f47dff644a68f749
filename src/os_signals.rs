//! # Binding recovery cancellation to process shutdown.
//!
//! A saga host usually wants every step waiting between attempts to stop as
//! soon as the process is asked to terminate. [`cancel_on_shutdown`] spawns a
//! watcher that cancels a [`CancellationToken`] on the first termination
//! signal; pass that token (or children of it) to
//! [`RecoveryPolicy::apply`](crate::RecoveryPolicy::apply).
//!
//! ## Signals
//! **Unix:** `SIGINT`, `SIGTERM`, `SIGQUIT`.
//! **Other platforms:** Ctrl-C via [`tokio::signal::ctrl_c`].

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Waits for a termination signal.
///
/// Returns `Err` if signal registration fails.
#[cfg(unix)]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::select! {
        _ = sigint.recv()  => {},
        _ = sigterm.recv() => {},
        _ = sigquit.recv() => {},
    }
    Ok(())
}

/// Waits for a termination signal.
///
/// Returns `Err` if signal registration fails.
#[cfg(not(unix))]
pub async fn wait_for_shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}

/// Cancels `token` when the process receives a termination signal.
///
/// The watcher exits quietly if `token` is cancelled by someone else first.
/// If signal registration fails the error is logged and `token` is left alone.
pub fn cancel_on_shutdown(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            res = wait_for_shutdown_signal() => match res {
                Ok(()) => {
                    tracing::warn!("shutdown signal received; cancelling pending recoveries");
                    token.cancel();
                }
                Err(err) => tracing::error!(error = %err, "failed to register shutdown signals"),
            },
            _ = token.cancelled() => {}
        }
    })
}
