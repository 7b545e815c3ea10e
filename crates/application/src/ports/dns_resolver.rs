use async_trait::async_trait;
use meshdns_domain::{DnsRequest, DomainError};
use std::net::IpAddr;
use std::sync::Arc;

#[derive(Debug, Clone)]
pub struct DnsResolution {
    pub addresses: Arc<Vec<IpAddr>>,
    pub upstream_server: Option<Arc<str>>,
}

impl DnsResolution {
    pub fn new(addresses: Vec<IpAddr>) -> Self {
        Self {
            addresses: Arc::new(addresses),
            upstream_server: None,
        }
    }

    pub fn with_upstream(mut self, server: impl Into<Arc<str>>) -> Self {
        self.upstream_server = Some(server.into());
        self
    }
}

/// Resolves a name to the merged A and AAAA address list.
///
/// Implementations return `DomainError::NxDomain` when the name has no
/// addresses at all, and any other error when the lookup itself failed.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(&self, request: &DnsRequest) -> Result<DnsResolution, DomainError>;
}
