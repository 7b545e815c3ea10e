mod dns_resolver;
mod network;
mod service;

pub use dns_resolver::{DnsResolution, DnsResolver};
pub use network::Network;
pub use service::Service;
