use anyhow::Result;
use async_trait::async_trait;

use super::chain::StrategyChain;
use super::command::{CommandStrategy, PayloadMode};
use super::traits::DeliveryStrategy;

fn macos() -> bool {
    cfg!(target_os = "macos")
}

fn windows() -> bool {
    cfg!(windows)
}

/// Platform URL openers, then printing the URL for manual opening
pub fn system_opener() -> StrategyChain {
    StrategyChain::new()
        .with(CommandStrategy::new("open", "open", PayloadMode::Argument).when(macos))
        .with(CommandStrategy::new("xdg-open", "xdg-open", PayloadMode::Argument))
        .with(
            CommandStrategy::new("cmd-start", "cmd", PayloadMode::Argument)
                .args(&["/C", "start", ""])
                .when(windows),
        )
        .with(PrintStrategy)
}

/// Writes the URL to stderr so it can be opened by hand
#[derive(Debug, Default, Clone, Copy)]
pub struct PrintStrategy;

#[async_trait]
impl DeliveryStrategy for PrintStrategy {
    fn name(&self) -> &'static str {
        "print"
    }

    fn is_available(&self) -> bool {
        true
    }

    async fn deliver(&self, payload: &str) -> Result<()> {
        eprintln!("Open this URL in your browser: {}", payload);
        Ok(())
    }
}
