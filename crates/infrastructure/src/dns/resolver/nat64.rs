use super::handle::ResolverHandle;
use meshdns_application::services::partition_families;
use meshdns_domain::{Nat64Prefix, RecordType};
use std::net::IpAddr;
use std::sync::Arc;

/// DNS64: for AAAA lookups whose result carries no IPv6 address, appends
/// the IPv4 results embedded in the NAT64 prefix.
pub struct Nat64Resolver {
    inner: Arc<ResolverHandle>,
    prefix: Nat64Prefix,
}

impl Nat64Resolver {
    pub fn new(inner: Arc<ResolverHandle>, prefix: Nat64Prefix) -> Self {
        Self { inner, prefix }
    }

    pub(crate) fn inner(&self) -> &ResolverHandle {
        &self.inner
    }

    pub(crate) fn apply(&self, record_type: RecordType, addresses: Vec<IpAddr>) -> Vec<IpAddr> {
        if record_type != RecordType::AAAA {
            return addresses;
        }

        let (ipv4, ipv6) = partition_families(addresses.clone());
        if !ipv6.is_empty() {
            return addresses;
        }

        let mut out = addresses;
        out.extend(ipv4.into_iter().filter_map(|addr| match addr {
            IpAddr::V4(v4) => Some(IpAddr::V6(self.prefix.synthesize(v4))),
            IpAddr::V6(_) => None,
        }));
        out
    }
}
