use std::io::{IsTerminal, Write};

use anyhow::{Context, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::chain::StrategyChain;
use super::command::{env_present, CommandStrategy, PayloadMode};
use super::traits::DeliveryStrategy;

fn wayland() -> bool {
    env_present("WAYLAND_DISPLAY")
}

fn x11() -> bool {
    env_present("DISPLAY")
}

fn tmux() -> bool {
    env_present("TMUX")
}

/// Preferred clipboard mechanisms first, terminal escape last
pub fn system_clipboard() -> StrategyChain {
    StrategyChain::new()
        .with(CommandStrategy::new("pbcopy", "pbcopy", PayloadMode::Stdin))
        .with(CommandStrategy::new("wl-copy", "wl-copy", PayloadMode::Stdin).when(wayland))
        .with(
            CommandStrategy::new("xclip", "xclip", PayloadMode::Stdin)
                .args(&["-selection", "clipboard"])
                .when(x11),
        )
        .with(
            CommandStrategy::new("xsel", "xsel", PayloadMode::Stdin)
                .args(&["--clipboard", "--input"])
                .when(x11),
        )
        .with(CommandStrategy::new("clip.exe", "clip.exe", PayloadMode::Stdin))
        .with(
            CommandStrategy::new("tmux-buffer", "tmux", PayloadMode::Argument)
                .args(&["set-buffer", "--"])
                .when(tmux),
        )
        .with(Osc52Strategy)
}

/// OSC 52 escape sequence that asks the terminal to set its clipboard
pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

/// Legacy fallback: ask the attached terminal to copy via OSC 52
#[derive(Debug, Default, Clone, Copy)]
pub struct Osc52Strategy;

#[async_trait]
impl DeliveryStrategy for Osc52Strategy {
    fn name(&self) -> &'static str {
        "osc52"
    }

    fn is_available(&self) -> bool {
        std::io::stdout().is_terminal()
    }

    async fn deliver(&self, payload: &str) -> Result<()> {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(osc52_sequence(payload).as_bytes())
            .and_then(|_| stdout.flush())
            .context("Failed to write OSC 52 sequence")
    }
}
