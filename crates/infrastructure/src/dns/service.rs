use crate::dns::lifecycle::{DnsServer, ServerState};
use crate::dns::resolver::{
    build_resolvers, compose_resolvers, ResolverHandle, ResolverSet, ResolverSettings,
    SystemResolver,
};
use crate::dns::server::DnsServerHandler;
use async_trait::async_trait;
use meshdns_application::ports::{Network, Service};
use meshdns_application::services::QueryClassifier;
use meshdns_application::use_cases::HandleDnsQueryUseCase;
use meshdns_domain::{Config, DomainError, Nat64Prefix, UpstreamAddr, DEFAULT_DNS_PORT};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::info;

const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);
const DEFAULT_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// The DNS service: authoritative for the network's own domain, recursive
/// for everything else.
///
/// Construction only validates parameters. Resolvers are composed and the
/// transports bound each time [`Service::serve`] runs.
pub struct DnsService {
    settings: ResolverSettings,
    port: u16,
    shutdown_timeout: Duration,
    system_nameservers: Option<Vec<SocketAddr>>,
    state: Arc<watch::Sender<ServerState>>,
}

impl DnsService {
    /// Fails fast on a prefix that is not a /96 or an upstream that does not
    /// parse as `host:port`. The prefix is checked even with NAT64 disabled.
    pub fn new(
        enable_nat64: bool,
        nat64_prefix: &str,
        public_upstream_servers: &[String],
    ) -> Result<Self, DomainError> {
        let nat64_prefix: Nat64Prefix = nat64_prefix.parse()?;
        let public_upstreams = public_upstream_servers
            .iter()
            .map(|server| server.parse::<UpstreamAddr>())
            .collect::<Result<Vec<_>, _>>()?;

        let (state, _) = watch::channel(ServerState::Idle);

        Ok(Self {
            settings: ResolverSettings {
                enable_nat64,
                nat64_prefix,
                public_upstreams,
                query_timeout: DEFAULT_QUERY_TIMEOUT,
            },
            port: DEFAULT_DNS_PORT,
            shutdown_timeout: DEFAULT_SHUTDOWN_TIMEOUT,
            system_nameservers: None,
            state: Arc::new(state),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, DomainError> {
        Ok(Self::new(
            config.dns.enable_nat64,
            &config.dns.nat64_prefix,
            &config.dns.public_upstream_servers,
        )?
        .with_port(config.server.dns_port)
        .with_query_timeout(Duration::from_secs(config.dns.query_timeout))
        .with_shutdown_timeout(Duration::from_secs(config.dns.shutdown_timeout)))
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_query_timeout(mut self, timeout: Duration) -> Self {
        self.settings.query_timeout = timeout;
        self
    }

    pub fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }

    /// Uses these nameservers for private queries instead of the ones in
    /// the OS resolver configuration.
    pub fn with_system_nameservers(mut self, nameservers: Vec<SocketAddr>) -> Self {
        self.system_nameservers = Some(nameservers);
        self
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn subscribe(&self) -> watch::Receiver<ServerState> {
        self.state.subscribe()
    }

    async fn resolve_handles(&self) -> Result<ResolverSet, DomainError> {
        match &self.system_nameservers {
            Some(nameservers) => {
                let system =
                    SystemResolver::new(nameservers.clone(), self.settings.query_timeout)?;
                compose_resolvers(ResolverHandle::System(system), &self.settings).await
            }
            None => build_resolvers(&self.settings).await,
        }
    }
}

#[async_trait]
impl Service for DnsService {
    fn name(&self) -> &'static str {
        "dns"
    }

    async fn serve(
        &self,
        shutdown: CancellationToken,
        network: Arc<dyn Network>,
    ) -> Result<(), DomainError> {
        let domain = network.domain()?;
        let resolvers = self.resolve_handles().await?;

        info!(
            domain = %domain,
            private = resolvers.private.kind(),
            public = resolvers.public.kind(),
            "Starting DNS service"
        );

        let use_case = Arc::new(HandleDnsQueryUseCase::new(
            QueryClassifier::new(&domain),
            resolvers.private,
            resolvers.public,
            Arc::clone(&network),
        ));

        let server = DnsServer::new(
            DnsServerHandler::new(use_case),
            self.port,
            self.shutdown_timeout,
        )
        .with_state(Arc::clone(&self.state));

        server.serve(shutdown, network.as_ref()).await
    }
}
