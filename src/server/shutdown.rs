// Signal handling module
// Resolves once a termination signal arrives; the accept loop selects on it.

use crate::logger;

/// Wait for SIGTERM or SIGINT (Ctrl+C).
#[cfg(unix)]
pub async fn wait_for_shutdown() {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm =
        signal(SignalKind::terminate()).expect("Failed to register SIGTERM handler");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => logger::log_shutdown("SIGINT"),
        _ = sigterm.recv() => logger::log_shutdown("SIGTERM"),
    }
}

/// Windows fallback - only handles Ctrl+C
#[cfg(not(unix))]
pub async fn wait_for_shutdown() {
    if tokio::signal::ctrl_c().await.is_ok() {
        logger::log_shutdown("Ctrl+C");
    }
}
