use super::{DnsQuery, DomainError, RecordType};
use std::sync::Arc;

/// Lower-cases a name and strips one trailing dot. The root name stays `.`.
pub fn canonical_name(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    if lower == "." {
        return lower;
    }
    match lower.strip_suffix('.') {
        Some(stripped) => stripped.to_string(),
        None => lower,
    }
}

/// The resolver-facing view of a query: the canonical name used for suffix
/// comparisons plus the question type.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub domain: Arc<str>,
    pub record_type: RecordType,
}

impl DnsRequest {
    pub fn new(domain: &str, record_type: RecordType) -> Self {
        Self {
            domain: canonical_name(domain).into(),
            record_type,
        }
    }

    pub fn from_query(query: &DnsQuery) -> Self {
        Self::new(&query.domain, query.record_type)
    }
}

/// Checks the textual limits of a name: no empty labels, labels of at most 63
/// bytes, at most 253 bytes overall. The root name `.` is valid.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    let name = name.strip_suffix('.').unwrap_or(name);
    if name.is_empty() {
        return Ok(());
    }
    if name.len() > 253 {
        return Err(DomainError::InvalidDomainName(format!(
            "name exceeds 253 bytes ({})",
            name.len()
        )));
    }
    for label in name.split('.') {
        if label.is_empty() {
            return Err(DomainError::InvalidDomainName(format!(
                "empty label in '{}'",
                name
            )));
        }
        if label.len() > 63 {
            return Err(DomainError::InvalidDomainName(format!(
                "label '{}' exceeds 63 bytes",
                label
            )));
        }
    }
    Ok(())
}
