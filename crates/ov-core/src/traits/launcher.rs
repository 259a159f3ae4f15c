//! Launcher trait

use async_trait::async_trait;

use crate::error::SupervisorError;

/// Something that can make sure a renderer is up before a client talks to it
#[async_trait]
pub trait RendererLauncher: Send + Sync {
    /// Start the renderer if it is not already running
    ///
    /// Returns `true` if a renderer was started by this call, `false` if one
    /// was already running (or is managed elsewhere).
    async fn ensure(&self) -> Result<bool, SupervisorError>;
}

/// A renderer whose lifecycle is managed outside this process
///
/// `ensure` never starts anything. Clients built on this launcher simply
/// connect to whatever is listening at their address.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExternalRenderer;

#[async_trait]
impl RendererLauncher for ExternalRenderer {
    async fn ensure(&self) -> Result<bool, SupervisorError> {
        Ok(false)
    }
}
