use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Invalid NAT64 prefix: {0}")]
    InvalidNat64Prefix(String),

    #[error("Invalid upstream server: {0}")]
    InvalidUpstream(String),

    #[error("Domain not found (NXDOMAIN)")]
    NxDomain,

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Upstream resolution failed: {0}")]
    UpstreamError(String),

    #[error("Resolver unavailable: {0}")]
    ResolverUnavailable(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Failed to listen on {transport} port: {reason}")]
    Bind {
        transport: &'static str,
        reason: String,
    },

    #[error("{transport} transport failed: {reason}")]
    TransportFailed {
        transport: &'static str,
        reason: String,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// True when the name has no addresses at all, as opposed to the lookup
    /// itself failing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NxDomain)
    }
}
