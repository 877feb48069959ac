//! Probe Executor backed by real child processes.

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use netlens_common::probe::{ProbeCommand, ProbeExecutor, ProbeFailure, RawProbeOutput};
use tokio::process::Command;
use tracing::{debug, error, warn};

/// Keeps console utilities from flashing a window on Windows hosts.
#[cfg(windows)]
const CREATE_NO_WINDOW: u32 = 0x0800_0000;

/// Runs diagnostic utilities with `tokio::process`.
///
/// The child is killed when the deadline expires. Stdout is returned when
/// non-empty, stderr otherwise, since utilities often report failures on
/// their normal output.
pub struct SystemProbeExecutor;

#[async_trait]
impl ProbeExecutor for SystemProbeExecutor {
    async fn execute(&self, command: &ProbeCommand, deadline: Duration) -> RawProbeOutput {
        debug!("Executing command: {command}");

        let mut cmd: Command = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        #[cfg(windows)]
        cmd.creation_flags(CREATE_NO_WINDOW);

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                error!("Failed to start '{command}': {e}");
                return RawProbeOutput::failed(String::new(), ProbeFailure::Spawn(e.to_string()));
            }
        };

        // Dropping the pending future drops the child, which kills it.
        let output = match tokio::time::timeout(deadline, child.wait_with_output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                error!("Failed to collect output of '{command}': {e}");
                return RawProbeOutput::failed(String::new(), ProbeFailure::Spawn(e.to_string()));
            }
            Err(_) => {
                warn!("'{command}' exceeded its {}s deadline", deadline.as_secs_f32());
                return RawProbeOutput::timed_out();
            }
        };

        let stdout: String = String::from_utf8_lossy(&output.stdout).into_owned();
        let text: String = if stdout.is_empty() {
            String::from_utf8_lossy(&output.stderr).into_owned()
        } else {
            stdout
        };

        if output.status.success() {
            RawProbeOutput::success(text)
        } else {
            warn!("'{command}' exited with {}", output.status);
            RawProbeOutput::failed(text, ProbeFailure::Exit(output.status.code()))
        }
    }
}
