//! A single running renderer process

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::{Child, Command};

use super::handshake::{Handshake, MAX_OUTPUT_LINE};
use crate::config::{RendererConfig, SupervisorConfig};
use crate::error::SupervisorError;

/// Handle to a renderer that completed its readiness handshake
#[derive(Debug)]
pub struct RendererProcess {
    child: Child,
    config: RendererConfig,
}

impl RendererProcess {
    /// Spawn the renderer and wait until it reports readiness
    ///
    /// On any handshake failure the half-started process is killed and
    /// reaped before the error is returned.
    pub async fn spawn(
        executable: &Path,
        config: RendererConfig,
        settings: &SupervisorConfig,
    ) -> Result<Self, SupervisorError> {
        let mut child = Command::new(executable)
            .args(config.args())
            .stdout(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(SupervisorError::Spawn)?;

        tracing::debug!(pid = ?child.id(), "Spawned renderer {:?}", executable);

        let Some(stdout) = child.stdout.take() else {
            discard(&mut child).await;
            return Err(SupervisorError::MissingStdout);
        };
        let mut stdout = BufReader::new(stdout);

        let mut handshake = Handshake::new(settings.handshake_lines);
        let outcome =
            tokio::time::timeout(settings.handshake_timeout, handshake.run(&mut stdout)).await;

        match outcome {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                discard(&mut child).await;
                return Err(e);
            }
            Err(_) => {
                discard(&mut child).await;
                return Err(SupervisorError::HandshakeTimeout(settings.handshake_timeout));
            }
        }

        // Keep the pipe drained so the renderer never blocks on a full stdout
        tokio::spawn(forward_output(stdout));

        tokio::time::sleep(settings.settle_delay).await;

        Ok(Self { child, config })
    }

    /// OS process id, if the process has not been reaped yet
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Placement this renderer was started with
    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Whether the process has exited on its own
    pub fn has_exited(&mut self) -> bool {
        match self.child.try_wait() {
            Ok(Some(status)) => {
                tracing::warn!("Renderer exited unexpectedly ({})", status);
                true
            }
            Ok(None) => false,
            Err(e) => {
                tracing::warn!("Failed to poll renderer status: {}", e);
                false
            }
        }
    }

    /// Ask the renderer to exit and wait until it has
    pub async fn terminate(mut self) -> Result<ExitStatus, SupervisorError> {
        request_exit(&mut self.child)?;
        let status = self.child.wait().await?;
        tracing::debug!("Renderer exited ({})", status);
        Ok(status)
    }
}

/// Send SIGTERM so the renderer can tear down its window cleanly
#[cfg(unix)]
fn request_exit(child: &mut Child) -> Result<(), SupervisorError> {
    let Some(pid) = child.id() else {
        // Already reaped
        return Ok(());
    };

    let result = unsafe { libc::kill(pid as libc::pid_t, libc::SIGTERM) };
    if result != 0 {
        let err = std::io::Error::last_os_error();
        // ESRCH: exited between the id() check and the signal
        if err.raw_os_error() != Some(libc::ESRCH) {
            return Err(SupervisorError::Io(err));
        }
    }
    Ok(())
}

#[cfg(not(unix))]
fn request_exit(child: &mut Child) -> Result<(), SupervisorError> {
    match child.start_kill() {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::InvalidInput => Ok(()),
        Err(e) => Err(SupervisorError::Io(e)),
    }
}

/// Kill and reap a renderer that never became ready
async fn discard(child: &mut Child) {
    if let Err(e) = child.start_kill() {
        tracing::debug!("Failed to kill renderer: {}", e);
    }
    if let Err(e) = child.wait().await {
        tracing::warn!("Failed to reap renderer: {}", e);
    }
}

/// Relay renderer stdout into the log until the pipe closes
async fn forward_output<R: AsyncBufRead + Unpin>(mut reader: R) {
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let mut line_reader = (&mut reader).take(MAX_OUTPUT_LINE);
        match line_reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(&buf);
                tracing::debug!(target: "renderer", "{}", line.trim_end());
            }
            Err(e) => {
                tracing::debug!(target: "renderer", "Stopped reading renderer output: {}", e);
                break;
            }
        }
    }
}
