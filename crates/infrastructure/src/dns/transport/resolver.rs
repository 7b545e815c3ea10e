use meshdns_domain::{DomainError, UpstreamAddr};
use std::net::SocketAddr;
use std::time::Duration;

/// Resolves a hostname to all its IP addresses (IPv4 + IPv6).
pub async fn resolve_all(
    hostname: &str,
    port: u16,
    timeout: Duration,
) -> Result<Vec<SocketAddr>, DomainError> {
    let target = format!("{}:{}", hostname, port);

    let addrs_iter = tokio::time::timeout(timeout, tokio::net::lookup_host(&target))
        .await
        .map_err(|_| {
            DomainError::InvalidUpstream(format!("Timed out resolving {}", target))
        })?
        .map_err(|e| {
            DomainError::InvalidUpstream(format!("DNS resolution failed for {}: {}", target, e))
        })?;

    let addrs: Vec<SocketAddr> = addrs_iter.collect();

    if addrs.is_empty() {
        return Err(DomainError::InvalidUpstream(format!(
            "No addresses found for {}",
            target
        )));
    }

    Ok(addrs)
}

/// Turns an upstream address into one concrete socket address, resolving
/// hostnames through the OS.
pub async fn resolve_upstream(
    addr: &UpstreamAddr,
    timeout: Duration,
) -> Result<SocketAddr, DomainError> {
    match addr {
        UpstreamAddr::Resolved(socket_addr) => Ok(*socket_addr),
        UpstreamAddr::Unresolved { hostname, port } => {
            let addrs = resolve_all(hostname, *port, timeout).await?;
            addrs.into_iter().next().ok_or_else(|| {
                DomainError::InvalidUpstream(format!("No addresses found for {}", addr))
            })
        }
    }
}
