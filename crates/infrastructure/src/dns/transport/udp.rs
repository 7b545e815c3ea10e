//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). If the response has the TC bit set
//! the caller retries over TCP.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use meshdns_domain::DomainError;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn bind_addr(&self) -> SocketAddr {
        let ip = if self.server_addr.is_ipv4() {
            IpAddr::V4(Ipv4Addr::UNSPECIFIED)
        } else {
            IpAddr::V6(Ipv6Addr::UNSPECIFIED)
        };
        SocketAddr::new(ip, 0)
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let socket = UdpSocket::bind(self.bind_addr()).await.map_err(|e| {
            DomainError::NetworkError(format!("Failed to bind UDP socket: {}", e))
        })?;

        let bytes_sent =
            tokio::time::timeout(timeout, socket.send_to(message_bytes, self.server_addr))
                .await
                .map_err(|_| DomainError::QueryTimeout)?
                .map_err(|e| {
                    DomainError::NetworkError(format!(
                        "Failed to send UDP query to {}: {}",
                        self.server_addr, e
                    ))
                })?;

        debug!(server = %self.server_addr, bytes_sent = bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let deadline = tokio::time::Instant::now() + timeout;

        // Datagrams from any other source are dropped and the wait resumes.
        let bytes_received = loop {
            let (bytes_received, from_addr) =
                tokio::time::timeout_at(deadline, socket.recv_from(&mut recv_buf))
                    .await
                    .map_err(|_| DomainError::QueryTimeout)?
                    .map_err(|e| {
                        DomainError::NetworkError(format!(
                            "Failed to receive UDP response from {}: {}",
                            self.server_addr, e
                        ))
                    })?;

            if from_addr == self.server_addr {
                break bytes_received;
            }

            warn!(
                expected = %self.server_addr,
                received_from = %from_addr,
                "Discarding UDP response from unexpected source"
            );
        };

        recv_buf.truncate(bytes_received);

        debug!(server = %self.server_addr, bytes_received = bytes_received, "UDP response received");

        Ok(TransportResponse { bytes: recv_buf })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_addr_matches_family() {
        let v4 = UdpTransport::new("8.8.8.8:53".parse().unwrap());
        assert!(v4.bind_addr().is_ipv4());

        let v6 = UdpTransport::new("[2001:4860:4860::8888]:53".parse().unwrap());
        assert!(v6.bind_addr().is_ipv6());
    }

    #[tokio::test]
    async fn test_unanswered_query_times_out() {
        let silent = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let transport = UdpTransport::new(silent.local_addr().unwrap());

        let err = transport
            .send(&[0u8; 12], Duration::from_millis(50))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::QueryTimeout);
    }

    #[tokio::test]
    async fn test_reply_from_other_source_is_discarded() {
        let upstream = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let impostor = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let transport = UdpTransport::new(upstream.local_addr().unwrap());

        let responder = tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let (_, client) = upstream.recv_from(&mut buf).await.unwrap();
            impostor.send_to(b"spoofed", client).await.unwrap();
            tokio::time::sleep(Duration::from_millis(20)).await;
            upstream.send_to(b"genuine", client).await.unwrap();
        });

        let response = transport
            .send(&[0u8; 12], Duration::from_secs(2))
            .await
            .unwrap();
        assert_eq!(response.bytes, b"genuine");
        responder.await.unwrap();
    }

    #[tokio::test]
    async fn test_only_foreign_replies_time_out() {
        let upstream = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let impostor = UdpSocket::bind("127.0.0.1:0").await.unwrap();
        let transport = UdpTransport::new(upstream.local_addr().unwrap());

        tokio::spawn(async move {
            let mut buf = [0u8; 512];
            let (_, client) = upstream.recv_from(&mut buf).await.unwrap();
            impostor.send_to(b"spoofed", client).await.unwrap();
        });

        let err = transport
            .send(&[0u8; 12], Duration::from_millis(200))
            .await
            .unwrap_err();
        assert_eq!(err, DomainError::QueryTimeout);
    }
}
