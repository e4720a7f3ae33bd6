use std::collections::HashMap;
use std::process::{Command, Stdio};

use log::debug;

use crate::error::Result;

/// Captured result of a finished child process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Runs a command to completion with optional environment variables,
/// capturing its output instead of inheriting the terminal.
///
/// # Errors
///
/// Returns an error if the process cannot be spawned. A non-zero exit status
/// is not an error here; callers inspect [`CommandOutput::success`].
pub fn capture_command<S: ::std::hash::BuildHasher>(
    mut command: Command,
    environment: Option<HashMap<String, String, S>>,
) -> Result<CommandOutput> {
    let mut command = command
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    if let Some(environment) = environment {
        debug!("Executing with environment variables: {:?}", environment);
        command = command.envs(environment);
    };

    debug!("Running {:?}", command);
    let output = command.output()?;

    Ok(CommandOutput {
        success: output.status.success(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    })
}
