//! Upstream resolver handles and their composition.
//!
//! Every handle answers a lookup with the merged A and AAAA addresses of a
//! name; the answer synthesizer picks the family the client asked for.

pub mod builder;
pub mod handle;
pub mod nat64;
pub mod remote;
pub mod round_robin;
pub mod system;

pub use builder::{build_resolvers, compose_resolvers, ResolverSet, ResolverSettings};
pub use handle::ResolverHandle;
pub use nat64::Nat64Resolver;
pub use remote::RemoteResolver;
pub use round_robin::RoundRobinResolver;
pub use system::SystemResolver;

use meshdns_domain::DomainError;
use std::net::IpAddr;

/// Combines the per-family outcomes of one lookup. Addresses from either
/// family win; otherwise a real failure is preferred over NXDOMAIN, and an
/// empty result is NXDOMAIN.
pub(crate) fn merge_families(
    ipv4: Result<Vec<IpAddr>, DomainError>,
    ipv6: Result<Vec<IpAddr>, DomainError>,
) -> Result<Vec<IpAddr>, DomainError> {
    match (ipv4, ipv6) {
        (Ok(mut v4), Ok(v6)) => {
            v4.extend(v6);
            if v4.is_empty() {
                Err(DomainError::NxDomain)
            } else {
                Ok(v4)
            }
        }
        (Ok(addrs), Err(e)) | (Err(e), Ok(addrs)) => {
            if addrs.is_empty() {
                Err(e)
            } else {
                Ok(addrs)
            }
        }
        (Err(v4_err), Err(v6_err)) => {
            if v4_err.is_not_found() {
                Err(v6_err)
            } else {
                Err(v4_err)
            }
        }
    }
}
