use meshdns_domain::{
    DnsQuery, DnsRecord, DnsResponse, DomainError, RecordType, ResponseStatus, AUTHORITATIVE_TTL,
    RECURSIVE_TTL,
};
use std::net::IpAddr;
use tracing::{debug, warn};

/// Turns a lookup outcome into a response for one zone class.
#[derive(Debug, Clone, Copy)]
pub struct AnswerSynthesizer {
    authoritative: bool,
    ttl: u32,
}

impl AnswerSynthesizer {
    pub const fn authoritative() -> Self {
        Self {
            authoritative: true,
            ttl: AUTHORITATIVE_TTL,
        }
    }

    pub const fn recursive() -> Self {
        Self {
            authoritative: false,
            ttl: RECURSIVE_TTL,
        }
    }

    /// An empty reply carrying this zone's header flags.
    pub fn reply(&self, query: &DnsQuery) -> DnsResponse {
        let mut response = DnsResponse::reply_to(query);
        response.authoritative = self.authoritative;
        response.recursion_available = true;
        response
    }

    pub fn refuse(&self, query: &DnsQuery) -> DnsResponse {
        self.reply(query).with_status(ResponseStatus::Refused)
    }

    pub fn synthesize(
        &self,
        query: &DnsQuery,
        lookup: Result<Vec<IpAddr>, DomainError>,
    ) -> DnsResponse {
        let reply = self.reply(query);

        let addresses = match lookup {
            Ok(addresses) => addresses,
            Err(e) if e.is_not_found() => {
                return reply.with_status(ResponseStatus::NameError);
            }
            Err(e) => {
                warn!(
                    name = %query.domain,
                    qtype = %query.record_type,
                    error = %e,
                    "Failed to lookup DNS question"
                );
                return reply.with_status(ResponseStatus::ServerFailure);
            }
        };

        let (ipv4, ipv6) = partition_families(addresses);

        let selected = match query.record_type {
            RecordType::A => ipv4,
            RecordType::AAAA => ipv6,
            RecordType::Other(_) => {
                warn!(
                    name = %query.domain,
                    qtype = %query.record_type,
                    "Unsupported DNS query type"
                );
                return reply.with_status(ResponseStatus::NotImplemented);
            }
        };

        debug!(
            name = %query.domain,
            qtype = %query.record_type,
            answers = selected.len(),
            "Answering DNS question"
        );

        let mut response = reply;
        response.answers = selected
            .into_iter()
            .map(|addr| DnsRecord::for_address(query.domain.as_ref(), addr, self.ttl))
            .collect();
        response
    }
}

/// Splits addresses by family. IPv4-mapped IPv6 addresses count as IPv4.
pub fn partition_families(addresses: Vec<IpAddr>) -> (Vec<IpAddr>, Vec<IpAddr>) {
    let mut ipv4 = Vec::new();
    let mut ipv6 = Vec::new();
    for addr in addresses {
        match addr {
            IpAddr::V4(_) => ipv4.push(addr),
            IpAddr::V6(v6) => match v6.to_ipv4_mapped() {
                Some(v4) => ipv4.push(IpAddr::V4(v4)),
                None => ipv6.push(addr),
            },
        }
    }
    (ipv4, ipv6)
}

/// Parses peer-directory entries, skipping anything that is not an IP.
pub fn parse_peer_addresses(entries: &[String]) -> Vec<IpAddr> {
    entries
        .iter()
        .filter_map(|entry| match entry.trim().parse::<IpAddr>() {
            Ok(addr) => Some(addr),
            Err(_) => {
                warn!(address = %entry, "Failed to parse IP address");
                None
            }
        })
        .collect()
}
