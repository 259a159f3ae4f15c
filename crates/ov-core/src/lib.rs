//! ov-core: Renderer supervision and configuration for overlay-bridge
//!
//! This crate owns the external renderer process: locating its executable,
//! spawning it with the configured placement, waiting for its readiness line
//! and terminating it again. It also holds the configuration file model
//! shared by the client and the CLI.

pub mod config;
pub mod error;
pub mod supervisor;
pub mod traits;

pub use error::{ConfigError, SupervisorError};
pub use supervisor::ProcessSupervisor;
pub use traits::{ExternalRenderer, RendererLauncher};
