use std::process::{Command, Output};

use tracing::{debug, warn};

use crate::error::{Result, ShellMcpError};

/// Run `command` through the system interpreter and return its standard output.
///
/// Blocks until the process exits. There is no sandboxing, allow-list or
/// timeout: the command sees everything the server process sees. A non-zero
/// exit is the only failure; standard error on a clean exit is discarded.
pub fn execute(command: &str) -> Result<String> {
    debug!(command, "spawning shell command");

    let output = interpreter(command)
        .output()
        .map_err(|source| ShellMcpError::CommandSpawn {
            command: command.to_string(),
            source,
        })?;

    into_stdout(command, output)
}

#[cfg(not(windows))]
fn interpreter(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

#[cfg(windows)]
fn interpreter(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

fn into_stdout(command: &str, output: Output) -> Result<String> {
    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
    }

    let status = output.status.code();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    warn!(command, ?status, "shell command failed");

    Err(ShellMcpError::CommandExecution {
        command: command.to_string(),
        status,
        stderr,
    })
}
