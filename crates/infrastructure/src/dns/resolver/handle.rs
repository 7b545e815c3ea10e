use super::{Nat64Resolver, RemoteResolver, RoundRobinResolver, SystemResolver};
use async_trait::async_trait;
use futures::future::{BoxFuture, FutureExt};
use meshdns_application::ports::{DnsResolution, DnsResolver};
use meshdns_domain::{DnsRequest, DomainError};
use std::sync::Arc;

/// A composed resolver. Built once at service start and shared read-only
/// by every query.
pub enum ResolverHandle {
    System(SystemResolver),
    Remote(RemoteResolver),
    RoundRobin(RoundRobinResolver),
    Nat64(Nat64Resolver),
}

impl ResolverHandle {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::System(_) => "system",
            Self::Remote(_) => "remote",
            Self::RoundRobin(_) => "round-robin",
            Self::Nat64(_) => "nat64",
        }
    }

    pub fn wrap_nat64(inner: Arc<ResolverHandle>, prefix: meshdns_domain::Nat64Prefix) -> Self {
        Self::Nat64(Nat64Resolver::new(inner, prefix))
    }

    pub fn lookup<'a>(
        &'a self,
        request: &'a DnsRequest,
    ) -> BoxFuture<'a, Result<DnsResolution, DomainError>> {
        async move {
            match self {
                Self::System(system) => {
                    let (server, addrs) = system.lookup(&request.domain).await?;
                    Ok(DnsResolution::new(addrs).with_upstream(server.to_string()))
                }
                Self::Remote(remote) => {
                    let addrs = remote.lookup(&request.domain).await?;
                    Ok(DnsResolution::new(addrs).with_upstream(remote.server().to_string()))
                }
                Self::RoundRobin(round_robin) => round_robin.next().lookup(request).await,
                Self::Nat64(nat64) => {
                    let resolution = nat64.inner().lookup(request).await?;
                    let addrs = nat64.apply(request.record_type, resolution.addresses.to_vec());
                    Ok(DnsResolution {
                        addresses: Arc::new(addrs),
                        upstream_server: resolution.upstream_server,
                    })
                }
            }
        }
        .boxed()
    }
}

#[async_trait]
impl DnsResolver for ResolverHandle {
    async fn resolve(&self, request: &DnsRequest) -> Result<DnsResolution, DomainError> {
        self.lookup(request).await
    }
}
