use async_trait::async_trait;
use meshdns_application::ports::Network;
use meshdns_domain::config::NetworkConfig;
use meshdns_domain::{canonical_name, Config, DomainError};
use socket2::{Domain, Protocol, Socket, Type};
use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use tokio::net::{TcpListener, UdpSocket};
use tracing::debug;

/// A `Network` backed by the host's own sockets and a static peer
/// directory from the `[network]` config section.
pub struct HostNetwork {
    domain: String,
    hostname: String,
    directory: HashMap<String, Vec<String>>,
    bind_address: IpAddr,
}

impl HostNetwork {
    pub fn new(network: &NetworkConfig, bind_address: IpAddr) -> Self {
        let mut directory: HashMap<String, Vec<String>> = network
            .peers
            .iter()
            .map(|peer| (canonical_name(&peer.name), peer.addresses.clone()))
            .collect();

        // The node's own name shadows a peer of the same name.
        directory.insert(canonical_name(&network.hostname), network.addresses.clone());

        Self {
            domain: canonical_name(&network.domain),
            hostname: network.hostname.clone(),
            directory,
            bind_address,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, DomainError> {
        let bind_address = config
            .server
            .bind_address
            .parse::<IpAddr>()
            .map_err(|_| DomainError::InvalidIpAddress(config.server.bind_address.clone()))?;
        Ok(Self::new(&config.network, bind_address))
    }

    /// Maps `host1` and `host1.<domain>` to the directory key `host1`.
    fn directory_key(&self, name: &str) -> Option<String> {
        let name = canonical_name(name);
        let bare = match name.strip_suffix(self.domain.as_str()) {
            Some(prefix) if prefix.ends_with('.') => &prefix[..prefix.len() - 1],
            _ => name.as_str(),
        };
        if bare.is_empty() || bare.contains('.') {
            return None;
        }
        Some(bare.to_string())
    }

    fn bind_addr(&self, port: u16) -> SocketAddr {
        SocketAddr::new(self.bind_address, port)
    }
}

#[async_trait]
impl Network for HostNetwork {
    fn domain(&self) -> Result<String, DomainError> {
        Ok(self.domain.clone())
    }

    fn hostname(&self) -> Result<String, DomainError> {
        Ok(self.hostname.clone())
    }

    async fn lookup_host(&self, name: &str) -> Result<Vec<String>, DomainError> {
        let addresses = self
            .directory_key(name)
            .and_then(|key| self.directory.get(&key))
            .cloned()
            .ok_or(DomainError::NxDomain)?;

        debug!(name = %name, addresses = addresses.len(), "Peer directory hit");
        Ok(addresses)
    }

    async fn listen_tcp(&self, port: u16) -> Result<TcpListener, DomainError> {
        create_tcp_listener(self.bind_addr(port)).map_err(|e| DomainError::Bind {
            transport: "TCP",
            reason: e.to_string(),
        })
    }

    async fn listen_udp(&self, port: u16) -> Result<UdpSocket, DomainError> {
        create_udp_socket(self.bind_addr(port)).map_err(|e| DomainError::Bind {
            transport: "UDP",
            reason: e.to_string(),
        })
    }
}

fn socket_domain(addr: &SocketAddr) -> Domain {
    if addr.is_ipv6() {
        Domain::IPV6
    } else {
        Domain::IPV4
    }
}

fn create_udp_socket(socket_addr: SocketAddr) -> std::io::Result<UdpSocket> {
    let socket = Socket::new(socket_domain(&socket_addr), Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    UdpSocket::from_std(std_socket)
}

fn create_tcp_listener(socket_addr: SocketAddr) -> std::io::Result<TcpListener> {
    let socket = Socket::new(socket_domain(&socket_addr), Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    TcpListener::from_std(std_listener)
}
