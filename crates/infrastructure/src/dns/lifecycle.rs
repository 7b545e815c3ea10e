//! Dual-transport server lifecycle.
//!
//! One UDP socket and one TCP listener are bound on the service port and
//! each is driven by its own hickory `ServerFuture`. Both run under a child
//! of the caller's shutdown token: cancelling the caller stops both, and a
//! transport that dies on its own takes its sibling down with it.

use crate::dns::server::DnsServerHandler;
use hickory_server::ServerFuture;
use meshdns_application::ports::Network;
use meshdns_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const TCP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerState {
    Idle,
    Binding,
    Serving { udp: SocketAddr, tcp: SocketAddr },
    ShuttingDown,
    Stopped,
}

pub struct DnsServer {
    handler: DnsServerHandler,
    port: u16,
    shutdown_timeout: Duration,
    state: Arc<watch::Sender<ServerState>>,
}

impl DnsServer {
    pub fn new(handler: DnsServerHandler, port: u16, shutdown_timeout: Duration) -> Self {
        let (state, _) = watch::channel(ServerState::Idle);
        Self {
            handler,
            port,
            shutdown_timeout,
            state: Arc::new(state),
        }
    }

    /// Publishes state changes on an existing channel.
    pub fn with_state(mut self, state: Arc<watch::Sender<ServerState>>) -> Self {
        self.state = state;
        self
    }

    pub fn subscribe(&self) -> watch::Receiver<ServerState> {
        self.state.subscribe()
    }

    /// Binds both transports and serves until `shutdown` is cancelled.
    ///
    /// Returns `Ok(())` after a requested shutdown, or the first fatal
    /// transport error. A bind failure leaves nothing bound.
    pub async fn serve(
        &self,
        shutdown: CancellationToken,
        network: &dyn Network,
    ) -> Result<(), DomainError> {
        self.state.send_replace(ServerState::Binding);

        let (udp_server, tcp_server, udp_addr, tcp_addr) = match self.bind(network).await {
            Ok(bound) => bound,
            Err(e) => {
                self.state.send_replace(ServerState::Stopped);
                return Err(e);
            }
        };

        info!(udp = %udp_addr, tcp = %tcp_addr, "Listening for DNS queries");
        self.state.send_replace(ServerState::Serving {
            udp: udp_addr,
            tcp: tcp_addr,
        });

        let group = shutdown.child_token();
        let mut tasks = JoinSet::new();
        for (transport, server) in [("udp", udp_server), ("tcp", tcp_server)] {
            tasks.spawn(run_transport(
                transport,
                server,
                group.clone(),
                self.shutdown_timeout,
            ));
        }

        let result = self.join_transports(tasks, group).await;

        self.state.send_replace(ServerState::Stopped);
        info!("DNS server stopped");
        result
    }

    /// Waits for every transport task. The first failure cancels `group` so
    /// the remaining transports drain, and is returned once they have.
    async fn join_transports(
        &self,
        mut tasks: JoinSet<Result<(), DomainError>>,
        group: CancellationToken,
    ) -> Result<(), DomainError> {
        let mut first_error = None;
        let mut shutting_down = false;
        loop {
            tokio::select! {
                _ = group.cancelled(), if !shutting_down => {
                    shutting_down = true;
                    self.state.send_replace(ServerState::ShuttingDown);
                }
                joined = tasks.join_next() => {
                    let Some(joined) = joined else { break };
                    let result = joined.unwrap_or_else(|e| {
                        Err(DomainError::TransportFailed {
                            transport: "dns",
                            reason: e.to_string(),
                        })
                    });
                    if let Err(e) = result {
                        error!(error = %e, "DNS transport failed");
                        first_error.get_or_insert(e);
                        if !shutting_down {
                            shutting_down = true;
                            self.state.send_replace(ServerState::ShuttingDown);
                        }
                        group.cancel();
                    }
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn bind(
        &self,
        network: &dyn Network,
    ) -> Result<
        (
            ServerFuture<DnsServerHandler>,
            ServerFuture<DnsServerHandler>,
            SocketAddr,
            SocketAddr,
        ),
        DomainError,
    > {
        let udp = network
            .listen_udp(self.port)
            .await
            .map_err(|e| DomainError::Bind {
                transport: "UDP",
                reason: e.to_string(),
            })?;

        // Dropping `udp` on this error path releases the UDP port again.
        let tcp = network
            .listen_tcp(self.port)
            .await
            .map_err(|e| DomainError::Bind {
                transport: "TCP",
                reason: e.to_string(),
            })?;

        let udp_addr = udp.local_addr().map_err(|e| DomainError::Bind {
            transport: "UDP",
            reason: e.to_string(),
        })?;
        let tcp_addr = tcp.local_addr().map_err(|e| DomainError::Bind {
            transport: "TCP",
            reason: e.to_string(),
        })?;

        let mut udp_server = ServerFuture::new(self.handler.clone());
        udp_server.register_socket(udp);

        let mut tcp_server = ServerFuture::new(self.handler.clone());
        tcp_server.register_listener(tcp, TCP_TIMEOUT);

        Ok((udp_server, tcp_server, udp_addr, tcp_addr))
    }
}

/// Drives one transport until it exits or the group is cancelled. On
/// cancellation the server is given `shutdown_timeout` to drain; a slow or
/// failed drain is logged and otherwise ignored.
async fn run_transport(
    transport: &'static str,
    mut server: ServerFuture<DnsServerHandler>,
    group: CancellationToken,
    shutdown_timeout: Duration,
) -> Result<(), DomainError> {
    let server_token = server.shutdown_token().clone();
    let serve = server.block_until_done();
    tokio::pin!(serve);

    tokio::select! {
        result = &mut serve => {
            let reason = match result {
                Ok(()) => "server exited unexpectedly".to_string(),
                Err(e) => e.to_string(),
            };
            return Err(DomainError::TransportFailed { transport, reason });
        }
        _ = group.cancelled() => {}
    }

    server_token.cancel();
    match tokio::time::timeout(shutdown_timeout, serve).await {
        Ok(Ok(())) => debug!(transport, "Transport shut down"),
        Ok(Err(e)) => warn!(transport, error = %e, "Transport shutdown failed"),
        Err(_) => warn!(transport, timeout = ?shutdown_timeout, "Transport shutdown timed out"),
    }
    Ok(())
}
