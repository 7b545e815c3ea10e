use async_trait::async_trait;
use meshdns_domain::DomainError;
use tokio::net::{TcpListener, UdpSocket};

/// The virtual network a service runs on: its identity, the peer directory
/// and transport bindings.
#[async_trait]
pub trait Network: Send + Sync {
    /// The network's own domain, answered authoritatively.
    fn domain(&self) -> Result<String, DomainError>;

    fn hostname(&self) -> Result<String, DomainError>;

    /// Peer-directory lookup. Unknown names fail with `DomainError::NxDomain`.
    /// Entries are returned as text; callers parse and skip what is not an IP.
    async fn lookup_host(&self, name: &str) -> Result<Vec<String>, DomainError>;

    async fn listen_tcp(&self, port: u16) -> Result<TcpListener, DomainError>;

    async fn listen_udp(&self, port: u16) -> Result<UdpSocket, DomainError>;
}
