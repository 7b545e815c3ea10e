use super::remote::RemoteResolver;
use crate::dns::forwarding::ResponseParser;
use meshdns_domain::DomainError;
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::{debug, warn};

/// The host's configured nameservers, tried in order. The next server is
/// only consulted when the current one cannot be reached.
pub struct SystemResolver {
    servers: Vec<RemoteResolver>,
}

impl SystemResolver {
    pub fn new(nameservers: Vec<SocketAddr>, timeout: Duration) -> Result<Self, DomainError> {
        if nameservers.is_empty() {
            return Err(DomainError::ResolverUnavailable(
                "no nameservers configured".to_string(),
            ));
        }
        Ok(Self {
            servers: nameservers
                .into_iter()
                .map(|addr| RemoteResolver::new(addr, timeout))
                .collect(),
        })
    }

    /// Reads the nameserver list from the OS resolver configuration.
    pub fn from_system_conf(timeout: Duration) -> Result<Self, DomainError> {
        let (config, _opts) = hickory_resolver::system_conf::read_system_conf()
            .map_err(|e| DomainError::ResolverUnavailable(e.to_string()))?;

        let mut nameservers: Vec<SocketAddr> = Vec::new();
        for ns in config.name_servers() {
            if !nameservers.contains(&ns.socket_addr) {
                nameservers.push(ns.socket_addr);
            }
        }

        debug!(nameservers = ?nameservers, "Loaded system resolver configuration");
        Self::new(nameservers, timeout)
    }

    pub fn nameservers(&self) -> Vec<SocketAddr> {
        self.servers.iter().map(RemoteResolver::server).collect()
    }

    pub async fn lookup(&self, domain: &str) -> Result<(SocketAddr, Vec<IpAddr>), DomainError> {
        let mut last_error = None;

        for (position, server) in self.servers.iter().enumerate() {
            match server.lookup(domain).await {
                Ok(addrs) => return Ok((server.server(), addrs)),
                Err(e) if ResponseParser::is_transport_error(&e) => {
                    warn!(server = %server.server(), error = %e, position, "Failing over");
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_error.unwrap_or_else(|| {
            DomainError::ResolverUnavailable("no nameservers configured".to_string())
        }))
    }
}
