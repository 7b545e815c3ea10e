use meshdns_application::ports::{Network, Service};
use std::sync::Arc;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// Runs every service on `network` until `shutdown` is cancelled.
///
/// The first service to fail cancels `shutdown` for the rest and its error
/// is returned once all of them have stopped.
pub async fn supervise(
    services: Vec<Arc<dyn Service>>,
    network: Arc<dyn Network>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let mut tasks = JoinSet::new();
    for service in services {
        let token = shutdown.clone();
        let network = Arc::clone(&network);
        tasks.spawn(async move {
            let name = service.name();
            info!(service = name, "Starting service");
            (name, service.serve(token, network).await)
        });
    }

    let mut first_error: Option<anyhow::Error> = None;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((name, Ok(()))) => info!(service = name, "Service stopped"),
            Ok((name, Err(e))) => {
                error!(service = name, error = %e, "Service failed");
                if first_error.is_none() {
                    first_error =
                        Some(anyhow::Error::new(e).context(format!("{} service failed", name)));
                }
                shutdown.cancel();
            }
            Err(e) => {
                error!(error = %e, "Service task aborted");
                if first_error.is_none() {
                    first_error = Some(anyhow::Error::new(e));
                }
                shutdown.cancel();
            }
        }
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Resolves on SIGINT or SIGTERM.
pub async fn wait_for_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => info!("Received SIGTERM"),
                    _ = sigint.recv() => info!("Received SIGINT"),
                }
                return;
            }
            (Err(e), _) | (_, Err(e)) => {
                warn!(error = %e, "Failed to register signal handlers, falling back to Ctrl+C");
            }
        }
    }

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received Ctrl+C"),
        Err(e) => {
            error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}
