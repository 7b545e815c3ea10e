use super::RecordType;
use std::sync::Arc;

/// A question as it arrived on the wire. `domain` keeps the client's
/// spelling, trailing dot included.
#[derive(Debug, Clone)]
pub struct DnsQuery {
    pub id: u16,
    pub domain: Arc<str>,
    pub record_type: RecordType,
    pub recursion_desired: bool,
}

impl DnsQuery {
    pub fn new(domain: impl Into<Arc<str>>, record_type: RecordType) -> Self {
        Self {
            id: 0,
            domain: domain.into(),
            record_type,
            recursion_desired: true,
        }
    }

    pub fn with_id(mut self, id: u16) -> Self {
        self.id = id;
        self
    }

    pub fn with_recursion_desired(mut self, recursion_desired: bool) -> Self {
        self.recursion_desired = recursion_desired;
        self
    }
}
