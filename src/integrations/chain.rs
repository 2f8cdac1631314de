use anyhow::{bail, Result};
use tracing::{debug, warn};

use super::traits::DeliveryStrategy;

/// Ordered fallback list of delivery strategies
#[derive(Default)]
pub struct StrategyChain {
    strategies: Vec<Box<dyn DeliveryStrategy>>,
}

impl StrategyChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a strategy after the existing ones
    pub fn with(mut self, strategy: impl DeliveryStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn len(&self) -> usize {
        self.strategies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strategies.is_empty()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    /// Try each available strategy in order until one succeeds.
    /// Returns the name of the strategy that delivered.
    pub async fn deliver(&self, payload: &str) -> Result<&'static str> {
        let mut failures = Vec::new();

        for strategy in &self.strategies {
            if !strategy.is_available() {
                debug!("Strategy {} not available, skipping", strategy.name());
                continue;
            }
            debug!("Trying strategy {}", strategy.name());
            match strategy.deliver(payload).await {
                Ok(()) => return Ok(strategy.name()),
                Err(e) => {
                    warn!("Strategy {} failed: {:#}", strategy.name(), e);
                    failures.push(format!("{}: {:#}", strategy.name(), e));
                }
            }
        }

        if failures.is_empty() {
            bail!("no available strategy");
        }
        bail!("all strategies failed ({})", failures.join("; "))
    }
}

impl std::fmt::Debug for StrategyChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyChain").field("strategies", &self.names()).finish()
    }
}
