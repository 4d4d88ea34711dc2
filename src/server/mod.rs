// Server module entry point
// Provides the listener, the accept loop, and graceful shutdown

pub mod connection;
pub mod listener;
pub mod shutdown;

pub use listener::bind_listener;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::logger;

/// Accept connections until a termination signal arrives, then stop
/// accepting and give in-flight requests (which may be mid-delay) a grace
/// period to finish.
pub async fn run(
    listener: TcpListener,
    config: Arc<Config>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    let shutdown = shutdown::wait_for_shutdown();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(
                            stream,
                            peer_addr,
                            &config,
                            &active_connections,
                        );
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            () = &mut shutdown => {
                drop(listener);
                // In-flight requests are at most one delay plus write time
                // from completion
                let grace = config.delay() + Duration::from_secs(1);
                drain_connections(&active_connections, grace).await;
                return Ok(());
            }
        }
    }
}

/// Wait for active connections to finish, up to the grace deadline.
async fn drain_connections(active_connections: &AtomicUsize, grace: Duration) {
    let deadline = tokio::time::Instant::now() + grace;

    while active_connections.load(Ordering::SeqCst) > 0 {
        if tokio::time::Instant::now() >= deadline {
            logger::log_warning(&format!(
                "Shutdown grace period elapsed with {} connection(s) still active",
                active_connections.load(Ordering::SeqCst)
            ));
            return;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    println!("[Shutdown] All connections drained");
}
