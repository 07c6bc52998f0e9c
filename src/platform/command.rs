//! External command execution with a deadline.

use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{HostwatchError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Output of a finished command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
}

/// Run a command, killing it if it does not finish within `timeout`.
///
/// Stderr is discarded. Stdout is drained on a helper thread so a chatty
/// child cannot block on a full pipe while we wait.
pub fn run_with_timeout(program: &str, args: &[&str], timeout: Duration) -> Result<CommandOutput> {
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| HostwatchError::command(format!("failed to spawn {}: {}", program, e)))?;

    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| HostwatchError::command(format!("{}: stdout not captured", program)))?;
    let reader = thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = stdout.read_to_end(&mut buf);
        buf
    });

    let deadline = Instant::now() + timeout;
    let status = loop {
        if let Some(status) = child.try_wait()? {
            break status;
        }
        if Instant::now() >= deadline {
            let _ = child.kill();
            let _ = child.wait();
            return Err(HostwatchError::command(format!(
                "{} timed out after {:?}",
                program, timeout
            )));
        }
        thread::sleep(POLL_INTERVAL);
    };

    let buf = reader
        .join()
        .map_err(|_| HostwatchError::command(format!("{}: output reader panicked", program)))?;

    Ok(CommandOutput {
        success: status.success(),
        stdout: String::from_utf8_lossy(&buf).into_owned(),
    })
}

/// Whether a program can be found on PATH.
pub fn is_available(program: &str) -> bool {
    which::which(program).is_ok()
}
