use super::RecordType;
use std::net::IpAddr;

/// One answer record. `domain` is the question name exactly as the client
/// sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub domain: String,

    pub record_type: RecordType,

    pub address: IpAddr,

    pub ttl: u32,
}

impl DnsRecord {
    pub fn new(domain: String, record_type: RecordType, address: IpAddr, ttl: u32) -> Self {
        Self {
            domain,
            record_type,
            address,
            ttl,
        }
    }

    /// Builds the record matching the address family: A for IPv4, AAAA for IPv6.
    pub fn for_address(domain: impl Into<String>, address: IpAddr, ttl: u32) -> Self {
        let record_type = match address {
            IpAddr::V4(_) => RecordType::A,
            IpAddr::V6(_) => RecordType::AAAA,
        };
        Self::new(domain.into(), record_type, address, ttl)
    }
}
