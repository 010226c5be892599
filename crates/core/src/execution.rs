use std::process::{Command, Stdio};

use log::{debug, info};

use crate::error::{Error, Result};

/// Runs a command attached to the user's terminal.
///
/// With `show_output` unset, the command's stdout is discarded; stderr and
/// stdin stay attached so prompts and failures remain visible.
///
/// # Errors
///
/// Returns an error if the command cannot be spawned or exits with non-zero
/// status.
pub fn execute_command(mut command: Command, show_output: bool) -> Result<()> {
    let stdout = if show_output {
        Stdio::inherit()
    } else {
        Stdio::null()
    };
    let command = command
        .stdin(Stdio::inherit())
        .stdout(stdout)
        .stderr(Stdio::inherit());

    info!("Executing {:?}", command);

    let subprocess_exit_success = command.spawn()?.wait()?.success();

    if subprocess_exit_success {
        Ok(())
    } else {
        Err(Error::SubProcessExit(describe(command)))
    }
}

/// Runs a command to completion and returns its stdout.
///
/// Returns `Ok(None)` when the command ran but exited with non-zero status,
/// which git uses for answers like "HEAD is detached".
///
/// # Errors
///
/// Returns an error if the command cannot be spawned or prints invalid
/// UTF-8.
pub fn capture_output(mut command: Command) -> Result<Option<String>> {
    debug!("Capturing {:?}", command);

    let output = command.stdin(Stdio::null()).output()?;

    if !output.status.success() {
        debug!(
            "{:?} exited with {}: {}",
            command,
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return Ok(None);
    }

    String::from_utf8(output.stdout)
        .map(Some)
        .map_err(|e| Error::Misc(format!("{} printed invalid UTF-8: {e}", describe(&command))))
}

fn describe(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|a| a.to_string_lossy())
        .collect::<Vec<_>>()
        .join(" ")
}
