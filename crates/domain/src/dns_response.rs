use super::{DnsQuery, DnsRecord};
use std::fmt;

/// TTL on answers from the network's own zone. Peer membership changes, so
/// this stays short.
pub const AUTHORITATIVE_TTL: u32 = 60;

/// TTL on recursively resolved answers. The upstream TTL is not propagated.
pub const RECURSIVE_TTL: u32 = 300;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResponseStatus {
    NoError,
    NameError,
    ServerFailure,
    NotImplemented,
    Refused,
}

impl ResponseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseStatus::NoError => "NOERROR",
            ResponseStatus::NameError => "NXDOMAIN",
            ResponseStatus::ServerFailure => "SERVFAIL",
            ResponseStatus::NotImplemented => "NOTIMP",
            ResponseStatus::Refused => "REFUSED",
        }
    }
}

impl fmt::Display for ResponseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsResponse {
    pub id: u16,
    pub status: ResponseStatus,
    pub authoritative: bool,
    pub recursion_available: bool,
    pub answers: Vec<DnsRecord>,
}

impl DnsResponse {
    /// An empty NOERROR reply mirroring the query's transaction id.
    pub fn reply_to(query: &DnsQuery) -> Self {
        Self {
            id: query.id,
            status: ResponseStatus::NoError,
            authoritative: false,
            recursion_available: false,
            answers: Vec::new(),
        }
    }

    pub fn with_status(mut self, status: ResponseStatus) -> Self {
        self.status = status;
        self
    }
}
