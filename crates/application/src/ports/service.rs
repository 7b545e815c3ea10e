use super::Network;
use async_trait::async_trait;
use meshdns_domain::DomainError;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A long-running unit attached to a network.
///
/// `serve` runs until `shutdown` is cancelled and then returns `Ok(())`.
/// Any other return is a fatal failure of the service.
#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &'static str;

    async fn serve(
        &self,
        shutdown: CancellationToken,
        network: Arc<dyn Network>,
    ) -> Result<(), DomainError>;
}
