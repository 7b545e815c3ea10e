//! meshdns domain layer
pub mod config;
pub mod dns_protocol;
pub mod dns_query;
pub mod dns_record;
pub mod dns_request;
pub mod dns_response;
pub mod errors;
pub mod nat64;
pub mod zone;

pub use config::{Config, DnsConfig};
pub use dns_protocol::{UpstreamAddr, DEFAULT_DNS_PORT};
pub use dns_query::DnsQuery;
pub use dns_record::{DnsRecord, RecordType};
pub use dns_request::{canonical_name, validate_name, DnsRequest};
pub use dns_response::{DnsResponse, ResponseStatus, AUTHORITATIVE_TTL, RECURSIVE_TTL};
pub use errors::DomainError;
pub use nat64::{Nat64Prefix, DEFAULT_NAT64_PREFIX};
pub use zone::ZoneClassification;
