use super::merge_families;
use crate::dns::forwarding::{MessageBuilder, ResponseParser, UpstreamResponse};
use crate::dns::transport::Transport;
use meshdns_domain::{DomainError, RecordType};
use std::net::{IpAddr, SocketAddr};
use std::time::Duration;
use tracing::debug;

/// Queries one upstream DNS server over UDP, retrying over TCP when the
/// answer is truncated.
pub struct RemoteResolver {
    server: SocketAddr,
    udp: Transport,
    tcp: Transport,
    timeout: Duration,
}

impl RemoteResolver {
    pub fn new(server: SocketAddr, timeout: Duration) -> Self {
        Self {
            server,
            udp: Transport::udp(server),
            tcp: Transport::tcp(server),
            timeout,
        }
    }

    pub fn server(&self) -> SocketAddr {
        self.server
    }

    /// Sends the A and AAAA questions concurrently and merges the answers.
    pub async fn lookup(&self, domain: &str) -> Result<Vec<IpAddr>, DomainError> {
        let (ipv4, ipv6) = tokio::join!(
            self.query(domain, RecordType::A),
            self.query(domain, RecordType::AAAA)
        );
        merge_families(ipv4, ipv6)
    }

    async fn query(&self, domain: &str, record_type: RecordType) -> Result<Vec<IpAddr>, DomainError> {
        self.exchange(domain, record_type).await?.into_addresses()
    }

    async fn exchange(
        &self,
        domain: &str,
        record_type: RecordType,
    ) -> Result<UpstreamResponse, DomainError> {
        let (id, bytes) = MessageBuilder::build_query_with_id(domain, &record_type)?;

        let reply = self.udp.send(&bytes, self.timeout).await?;
        let response = Self::check_id(id, ResponseParser::parse(&reply.bytes)?)?;
        if !response.truncated {
            return Ok(response);
        }

        debug!(server = %self.server, domain = %domain, "Truncated UDP response, retrying over TCP");
        let reply = self.tcp.send(&bytes, self.timeout).await?;
        Self::check_id(id, ResponseParser::parse(&reply.bytes)?)
    }

    fn check_id(id: u16, response: UpstreamResponse) -> Result<UpstreamResponse, DomainError> {
        if response.id != id {
            return Err(DomainError::NetworkError(format!(
                "Response ID {} does not match query ID {}",
                response.id, id
            )));
        }
        Ok(response)
    }
}
