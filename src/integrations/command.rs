use std::path::Path;
use std::process::Stdio;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use super::traits::DeliveryStrategy;

/// How the payload reaches the external program
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayloadMode {
    /// Written to the program's stdin
    Stdin,
    /// Appended as the last argument
    Argument,
}

/// Delivers text by running an external program such as `pbcopy` or `xdg-open`
#[derive(Debug, Clone)]
pub struct CommandStrategy {
    name: &'static str,
    program: &'static str,
    args: Vec<&'static str>,
    mode: PayloadMode,
    precondition: fn() -> bool,
}

impl CommandStrategy {
    pub fn new(name: &'static str, program: &'static str, mode: PayloadMode) -> Self {
        Self { name, program, args: Vec::new(), mode, precondition: always }
    }

    pub fn args(mut self, args: &[&'static str]) -> Self {
        self.args = args.to_vec();
        self
    }

    /// Extra environment check on top of the program being installed
    pub fn when(mut self, precondition: fn() -> bool) -> Self {
        self.precondition = precondition;
        self
    }
}

fn always() -> bool {
    true
}

/// Whether `program` resolves to a file on `PATH`
pub fn program_on_path(program: &str) -> bool {
    let Some(paths) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&paths).any(|dir| {
        let candidate = dir.join(program);
        candidate.is_file() || (cfg!(windows) && Path::new(&format!("{}.exe", candidate.display())).is_file())
    })
}

pub fn env_present(name: &str) -> bool {
    std::env::var_os(name).is_some_and(|v| !v.is_empty())
}

#[async_trait]
impl DeliveryStrategy for CommandStrategy {
    fn name(&self) -> &'static str {
        self.name
    }

    fn is_available(&self) -> bool {
        (self.precondition)() && program_on_path(self.program)
    }

    async fn deliver(&self, payload: &str) -> Result<()> {
        let mut command = Command::new(self.program);
        command.args(&self.args).stdout(Stdio::null()).stderr(Stdio::piped());

        let output = match self.mode {
            PayloadMode::Argument => command
                .arg(payload)
                .stdin(Stdio::null())
                .output()
                .await
                .with_context(|| format!("Failed to run {}", self.program))?,
            PayloadMode::Stdin => {
                let mut child = command
                    .stdin(Stdio::piped())
                    .spawn()
                    .with_context(|| format!("Failed to spawn {}", self.program))?;
                if let Some(mut stdin) = child.stdin.take() {
                    stdin
                        .write_all(payload.as_bytes())
                        .await
                        .with_context(|| format!("Failed to write to {}", self.program))?;
                }
                child
                    .wait_with_output()
                    .await
                    .with_context(|| format!("Failed to wait for {}", self.program))?
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!("{} exited with {}: {}", self.program, output.status, stderr.trim());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_programs_are_unavailable() {
        let strategy =
            CommandStrategy::new("nope", "definitely-not-installed-job-scout", PayloadMode::Stdin);
        assert!(!strategy.is_available());
    }

    #[test]
    fn precondition_gates_availability() {
        fn never() -> bool {
            false
        }
        let strategy = CommandStrategy::new("sh", "sh", PayloadMode::Argument).when(never);
        assert!(!strategy.is_available());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn pipes_payload_through_stdin() {
        let ok = CommandStrategy::new("cat", "cat", PayloadMode::Stdin);
        if ok.is_available() {
            ok.deliver("hello").await.unwrap();
        }
        let failing = CommandStrategy::new("false", "false", PayloadMode::Argument);
        if failing.is_available() {
            assert!(failing.deliver("x").await.is_err());
        }
    }
}
