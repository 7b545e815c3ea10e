use super::handle::ResolverHandle;
use meshdns_domain::DomainError;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Rotates lookups across its children. Each lookup goes to exactly one
/// child; a failure is returned as-is rather than retried on the next.
pub struct RoundRobinResolver {
    children: Vec<ResolverHandle>,
    counter: AtomicUsize,
}

impl RoundRobinResolver {
    pub fn new(children: Vec<ResolverHandle>) -> Result<Self, DomainError> {
        if children.is_empty() {
            return Err(DomainError::ResolverUnavailable(
                "round-robin resolver needs at least one upstream".to_string(),
            ));
        }
        Ok(Self {
            children,
            counter: AtomicUsize::new(0),
        })
    }

    pub(crate) fn next(&self) -> &ResolverHandle {
        let index = self.counter.fetch_add(1, Ordering::Relaxed) % self.children.len();
        &self.children[index]
    }
}
