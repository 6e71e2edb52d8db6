//! Host halt through the system shutdown command

use std::process::Command;

use picoups_core::traits::ShutdownAction;
use tracing::{error, info};

/// Runs `shutdown -h now` and waits for it
///
/// The exit status is logged but changes nothing: the watch loop carries on
/// either way.
#[derive(Debug, Clone)]
pub struct HaltCommand {
    program: String,
    args: Vec<String>,
}

impl Default for HaltCommand {
    fn default() -> Self {
        Self::new("shutdown", &["-h", "now"])
    }
}

impl HaltCommand {
    /// Run `program` with `args` instead of the system shutdown command
    pub fn new(program: &str, args: &[&str]) -> Self {
        Self {
            program: program.to_owned(),
            args: args.iter().map(|arg| (*arg).to_owned()).collect(),
        }
    }
}

impl ShutdownAction for HaltCommand {
    fn trigger(&mut self) {
        match Command::new(&self.program).args(&self.args).status() {
            Ok(status) => info!(program = %self.program, %status, "halt command finished"),
            Err(err) => error!(program = %self.program, error = %err, "halt command failed to start"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_runs_command_to_completion() {
        let dir = TempDir::new().unwrap();
        let marker = dir.path().join("halted");
        let marker = marker.to_str().unwrap();

        HaltCommand::new("touch", &[marker]).trigger();

        assert!(fs::metadata(marker).is_ok());
    }

    #[test]
    fn test_failures_are_swallowed() {
        HaltCommand::new("false", &[]).trigger();
        HaltCommand::new("/nonexistent/shutdown", &[]).trigger();
    }
}
