//! A launcher that only reports what it would have run.

use std::sync::Mutex;

use tracing::info;

use super::am::am_start_args;
use crate::core::error::LaunchError;
use crate::core::intent::Intent;
use crate::core::opener::Launcher;

/// Accepts every request and records the equivalent `am` command line.
pub struct DryRunLauncher {
    program: String,
    issued: Mutex<Vec<String>>,
}

impl DryRunLauncher {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            issued: Mutex::new(Vec::new()),
        }
    }

    /// Command lines recorded so far, in issue order.
    pub fn issued(&self) -> Vec<String> {
        self.issued.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

impl Launcher for DryRunLauncher {
    fn start_activity(&self, intent: &Intent) -> Result<(), LaunchError> {
        let line = std::iter::once(self.program.clone())
            .chain(am_start_args(intent).into_iter().map(|a| shell_quote(&a)))
            .collect::<Vec<_>>()
            .join(" ");
        info!(command = %line, "dry run");
        if let Ok(mut issued) = self.issued.lock() {
            issued.push(line);
        }
        Ok(())
    }
}

/// Single-quote `arg` for a POSIX shell when it contains anything unusual.
fn shell_quote(arg: &str) -> String {
    let plain = arg
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || "-_./:=%@,".contains(c));
    if plain && !arg.is_empty() {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}
