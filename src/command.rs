//! External command execution
//!
//! Runs `git` and `gh` and captures their output.

use std::io::{self, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::debug;

/// Errors that can occur when running an external command
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("{program} is not installed or not in PATH")]
    NotFound { program: String },

    #[error("{program} command failed (exit code {exit_code}): {stderr}")]
    Failed {
        program: String,
        stderr: String,
        exit_code: i32,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Run `program` with `args` in `dir` (None = current directory)
///
/// Returns stdout on success. When `stdin` is given it is written to the
/// child's standard input.
pub fn run(
    program: &str,
    dir: Option<&Path>,
    args: &[&str],
    stdin: Option<&str>,
) -> Result<String, CommandError> {
    let mut cmd = Command::new(program);
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    cmd.args(args);
    cmd.stdin(if stdin.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });
    cmd.stdout(Stdio::piped()).stderr(Stdio::piped());

    debug!(program, ?args, "running command");
    let mut child = cmd.spawn().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            CommandError::NotFound {
                program: program.to_string(),
            }
        } else {
            CommandError::Io(e)
        }
    })?;

    // The pipe is closed before waiting so the child sees end of input
    let written = match (stdin, child.stdin.take()) {
        (Some(input), Some(mut pipe)) => pipe.write_all(input.as_bytes()),
        _ => Ok(()),
    };

    let output = child.wait_with_output()?;
    if !output.status.success() {
        return Err(CommandError::Failed {
            program: program.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        });
    }
    written?;
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
