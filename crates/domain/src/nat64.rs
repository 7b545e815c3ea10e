//! NAT64 address synthesis (RFC 6052, /96 form only).

use super::DomainError;
use ipnetwork::Ipv6Network;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::str::FromStr;

pub const DEFAULT_NAT64_PREFIX: &str = "64:ff9b::/96";

const NAT64_PREFIX_LEN: u8 = 96;

/// An IPv6 /96 prefix that IPv4 addresses are embedded into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Nat64Prefix {
    network: Ipv6Network,
}

impl Nat64Prefix {
    pub fn new(network: Ipv6Network) -> Result<Self, DomainError> {
        if network.prefix() != NAT64_PREFIX_LEN {
            return Err(DomainError::InvalidNat64Prefix(format!(
                "{} must be a /{} prefix",
                network, NAT64_PREFIX_LEN
            )));
        }
        Ok(Self { network })
    }

    pub fn network(&self) -> Ipv6Network {
        self.network
    }

    /// Embeds `addr` in the low 32 bits of the prefix.
    pub fn synthesize(&self, addr: Ipv4Addr) -> Ipv6Addr {
        let mut octets = self.network.network().octets();
        octets[12..].copy_from_slice(&addr.octets());
        Ipv6Addr::from(octets)
    }
}

impl FromStr for Nat64Prefix {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let network = Ipv6Network::from_str(s.trim())
            .map_err(|e| DomainError::InvalidNat64Prefix(format!("{}: {}", s, e)))?;
        Self::new(network)
    }
}

impl fmt::Display for Nat64Prefix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.network.network(), self.network.prefix())
    }
}
