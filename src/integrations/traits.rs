use anyhow::Result;
use async_trait::async_trait;

/// One way of handing text to the outside world (clipboard, browser, ...).
/// Strategies are tried in order by a [`StrategyChain`](super::StrategyChain).
#[async_trait]
pub trait DeliveryStrategy: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Cheap capability check; unavailable strategies are skipped
    fn is_available(&self) -> bool;

    /// Deliver `payload`
    async fn deliver(&self, payload: &str) -> Result<()>;
}
