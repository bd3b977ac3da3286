use anyhow::{Context, Result};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};
use std::process::{Command, Stdio};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct ExecCommand(String);

radial::impl_string_newtype!(ExecCommand);

impl ExecCommand {
    pub fn argv(&self) -> Result<Vec<String>> {
        let argv = shell_words::split(&self.0)
            .with_context(|| format!("Invalid command line '{}'", self.0))?;
        anyhow::ensure!(!argv.is_empty(), "Empty command line");
        Ok(argv)
    }
}

/// Spawns `exec` detached from the overlay, without a shell.
pub fn spawn(exec: &ExecCommand) -> Result<()> {
    let argv = exec.argv()?;
    let (program, args) = argv.split_first().context("Empty command line")?;
    Command::new(program)
        .args(args)
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .with_context(|| format!("Failed to spawn '{}'", program))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argv_splitting() {
        let exec = ExecCommand::new("notify-send 'Item dropped' --urgency=low");
        assert_eq!(
            exec.argv().unwrap(),
            vec!["notify-send", "Item dropped", "--urgency=low"]
        );
    }

    #[test]
    fn test_argv_rejects_bad_input() {
        assert!(ExecCommand::new("echo 'unterminated").argv().is_err());
        assert!(ExecCommand::new("   ").argv().is_err());
        assert!(spawn(&ExecCommand::new("")).is_err());
    }
}
