//! Renderer process supervision
//!
//! [`ProcessSupervisor`] tracks at most one renderer process. Every
//! check-then-act sequence (start, ensure, stop, restart) runs under a single
//! async mutex, so a UI action racing an automatic lifecycle event can
//! neither spawn a second renderer nor terminate one that is mid-startup.
//!
//! Share one supervisor between callers (usually behind an `Arc`) rather
//! than creating several: separate supervisors know nothing of each other.

mod handshake;
mod process;

pub use handshake::{Handshake, Verdict, MAX_OUTPUT_LINE, READY_SENTINEL};
pub use process::RendererProcess;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::config::{ConfigFile, RendererConfig, SupervisorConfig};
use crate::error::SupervisorError;
use crate::traits::RendererLauncher;

/// Owns the renderer process and its placement
pub struct ProcessSupervisor {
    settings: SupervisorConfig,
    state: Mutex<SupervisorState>,
}

struct SupervisorState {
    process: Option<RendererProcess>,
    /// Placement used by the next `ensure`
    config: RendererConfig,
}

impl SupervisorState {
    /// Whether a live renderer is tracked, forgetting one that has died
    fn is_tracked(&mut self) -> bool {
        if let Some(process) = self.process.as_mut() {
            if process.has_exited() {
                self.process = None;
            }
        }
        self.process.is_some()
    }
}

impl ProcessSupervisor {
    /// Create a supervisor with nothing running yet
    pub fn new(settings: SupervisorConfig, config: RendererConfig) -> Self {
        Self {
            settings,
            state: Mutex::new(SupervisorState {
                process: None,
                config,
            }),
        }
    }

    /// Create a supervisor from a loaded config file
    pub fn from_config(file: &ConfigFile) -> Self {
        Self::new(file.supervisor.clone(), file.renderer)
    }

    /// Process settings this supervisor was created with
    pub fn settings(&self) -> &SupervisorConfig {
        &self.settings
    }

    /// Placement the next start will use
    pub async fn renderer_config(&self) -> RendererConfig {
        self.state.lock().await.config
    }

    /// Whether a renderer is currently running
    pub async fn is_running(&self) -> bool {
        self.state.lock().await.is_tracked()
    }

    /// OS process id of the running renderer
    pub async fn pid(&self) -> Option<u32> {
        let mut state = self.state.lock().await;
        if state.is_tracked() {
            state.process.as_ref().and_then(RendererProcess::id)
        } else {
            None
        }
    }

    /// Start the renderer with `config`
    ///
    /// Returns `Ok(false)` without spawning anything if a renderer is
    /// already running. Fails if the executable is missing or the renderer
    /// does not report readiness in time.
    pub async fn start(&self, config: RendererConfig) -> Result<bool, SupervisorError> {
        let mut state = self.state.lock().await;
        if state.is_tracked() {
            tracing::warn!("Not starting renderer, already running");
            return Ok(false);
        }

        state.config = config;
        self.spawn_locked(&mut state).await?;
        Ok(true)
    }

    /// Start the renderer with the stored placement unless one is running
    pub async fn ensure(&self) -> Result<bool, SupervisorError> {
        let mut state = self.state.lock().await;
        if state.is_tracked() {
            return Ok(false);
        }

        self.spawn_locked(&mut state).await?;
        Ok(true)
    }

    /// Terminate the renderer and wait for it to exit
    ///
    /// Returns `Ok(false)` if nothing was running.
    pub async fn stop(&self) -> Result<bool, SupervisorError> {
        let mut state = self.state.lock().await;
        let Some(process) = state.process.take() else {
            tracing::warn!("Not stopping renderer, not started");
            return Ok(false);
        };

        tracing::info!(pid = ?process.id(), "Stopping renderer");
        process.terminate().await?;
        Ok(true)
    }

    /// Apply a new placement
    ///
    /// An unchanged placement is ignored. Otherwise it is stored, and a
    /// running renderer is stopped and started again with it. Returns `true`
    /// only if a renderer was restarted.
    pub async fn restart(&self, config: RendererConfig) -> Result<bool, SupervisorError> {
        let mut state = self.state.lock().await;
        if state.config == config {
            tracing::debug!("Renderer placement unchanged");
            return Ok(false);
        }

        state.config = config;
        if !state.is_tracked() {
            tracing::info!("Renderer placement updated, will apply on next start");
            return Ok(false);
        }

        tracing::info!("Renderer placement changed, restarting renderer");
        if let Some(process) = state.process.take() {
            process.terminate().await?;
        }
        self.spawn_locked(&mut state).await?;
        Ok(true)
    }

    /// Spawn with the stored placement; caller holds the state lock
    async fn spawn_locked(&self, state: &mut SupervisorState) -> Result<(), SupervisorError> {
        let executable = self.settings.resolve_renderer_path();
        if !executable.is_file() {
            tracing::error!("Unable to find renderer executable at {:?}", executable);
            return Err(SupervisorError::RendererNotFound(executable));
        }

        let config = state.config;
        tracing::info!(
            x = config.x,
            y = config.y,
            width = config.width,
            height = config.height,
            "Starting renderer"
        );

        let process = RendererProcess::spawn(&executable, config, &self.settings).await?;
        tracing::info!(pid = ?process.id(), "Renderer ready");
        state.process = Some(process);
        Ok(())
    }
}

#[async_trait]
impl RendererLauncher for ProcessSupervisor {
    async fn ensure(&self) -> Result<bool, SupervisorError> {
        ProcessSupervisor::ensure(self).await
    }
}
