use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use meshdns_domain::DomainError;
use std::net::IpAddr;
use tracing::debug;

/// The parts of an upstream reply the resolvers act on.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub id: u16,

    pub addresses: Vec<IpAddr>,

    pub rcode: ResponseCode,

    pub truncated: bool,
}

impl UpstreamResponse {
    /// Maps the rcode onto the resolver error taxonomy. NOERROR yields the
    /// addresses, which may be empty.
    pub fn into_addresses(self) -> Result<Vec<IpAddr>, DomainError> {
        match self.rcode {
            ResponseCode::NoError => Ok(self.addresses),
            ResponseCode::NXDomain => Err(DomainError::NxDomain),
            other => Err(DomainError::UpstreamError(
                ResponseParser::rcode_to_status(other).to_string(),
            )),
        }
    }
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<UpstreamResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::UpstreamError(format!("Failed to parse DNS response: {}", e))
        })?;

        let rcode = message.response_code();
        let truncated = message.truncated();

        let addresses: Vec<IpAddr> = message
            .answers()
            .iter()
            .filter_map(|record| match record.data() {
                RData::A(a) => Some(IpAddr::V4(a.0)),
                RData::AAAA(aaaa) => Some(IpAddr::V6(aaaa.0)),
                _ => None,
            })
            .collect();

        debug!(
            rcode = ?rcode,
            addresses = addresses.len(),
            truncated = truncated,
            "DNS response parsed"
        );

        Ok(UpstreamResponse {
            id: message.id(),
            addresses,
            rcode,
            truncated,
        })
    }

    /// True for failures where another server may still answer.
    pub fn is_transport_error(error: &DomainError) -> bool {
        matches!(
            error,
            DomainError::QueryTimeout | DomainError::NetworkError(_)
        )
    }

    pub fn rcode_to_status(rcode: ResponseCode) -> &'static str {
        match rcode {
            ResponseCode::NoError => "NOERROR",
            ResponseCode::NXDomain => "NXDOMAIN",
            ResponseCode::ServFail => "SERVFAIL",
            ResponseCode::Refused => "REFUSED",
            ResponseCode::NotImp => "NOTIMP",
            ResponseCode::FormErr => "FORMERR",
            _ => "UNKNOWN",
        }
    }
}
