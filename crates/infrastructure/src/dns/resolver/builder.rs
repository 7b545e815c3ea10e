use super::{ResolverHandle, RemoteResolver, RoundRobinResolver, SystemResolver};
use crate::dns::transport::resolver::resolve_upstream;
use meshdns_domain::{DomainError, Nat64Prefix, UpstreamAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

#[derive(Debug, Clone)]
pub struct ResolverSettings {
    pub enable_nat64: bool,
    pub nat64_prefix: Nat64Prefix,
    pub public_upstreams: Vec<UpstreamAddr>,
    pub query_timeout: Duration,
}

/// The two resolvers the recursive zone routes between. `public` is the
/// same handle as `private` when no public upstreams are configured.
#[derive(Clone)]
pub struct ResolverSet {
    pub private: Arc<ResolverHandle>,
    pub public: Arc<ResolverHandle>,
}

/// Builds the resolver graph on top of the OS resolver configuration.
pub async fn build_resolvers(settings: &ResolverSettings) -> Result<ResolverSet, DomainError> {
    let system = SystemResolver::from_system_conf(settings.query_timeout)?;
    info!(nameservers = ?system.nameservers(), "Using system resolver for private queries");
    compose_resolvers(ResolverHandle::System(system), settings).await
}

/// Composes `private` with the configured public upstreams and NAT64.
pub async fn compose_resolvers(
    private: ResolverHandle,
    settings: &ResolverSettings,
) -> Result<ResolverSet, DomainError> {
    let private = Arc::new(private);

    let public = if settings.public_upstreams.is_empty() {
        Arc::clone(&private)
    } else {
        info!(
            servers = settings.public_upstreams.len(),
            "Using user-defined public upstream resolvers"
        );

        let mut children = Vec::with_capacity(settings.public_upstreams.len());
        for upstream in &settings.public_upstreams {
            let server = resolve_upstream(upstream, settings.query_timeout).await?;
            children.push(ResolverHandle::Remote(RemoteResolver::new(
                server,
                settings.query_timeout,
            )));
        }
        Arc::new(ResolverHandle::RoundRobin(RoundRobinResolver::new(children)?))
    };

    if !settings.enable_nat64 {
        return Ok(ResolverSet { private, public });
    }

    info!(prefix = %settings.nat64_prefix, "Enabling DNS64");

    Ok(ResolverSet {
        private: Arc::new(ResolverHandle::wrap_nat64(private, settings.nat64_prefix)),
        public: Arc::new(ResolverHandle::wrap_nat64(public, settings.nat64_prefix)),
    })
}
