//! Core error types for overlay-bridge

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Renderer lifecycle errors
///
/// Everything here is fatal for the operation that raised it: the supervisor
/// never retries a failed start on its own.
#[derive(Error, Debug)]
pub enum SupervisorError {
    /// Renderer executable does not exist at the resolved path
    #[error("Renderer executable not found: {0}")]
    RendererNotFound(PathBuf),

    /// Process could not be spawned
    #[error("Failed to spawn renderer: {0}")]
    Spawn(#[source] std::io::Error),

    /// Spawned process had no captured stdout
    #[error("Renderer stdout was not captured")]
    MissingStdout,

    /// Readiness line not seen within the line budget
    #[error("Renderer failed to start up: no readiness line in the first {lines_read} lines")]
    HandshakeExhausted { lines_read: usize },

    /// Renderer closed its output before signalling readiness
    #[error("Renderer exited during startup after {lines_read} lines")]
    RendererExited { lines_read: usize },

    /// Readiness line not seen before the deadline
    #[error("Renderer failed to start up within {0:?}")]
    HandshakeTimeout(Duration),

    /// I/O error while talking to the process
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file not found
    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    /// Invalid configuration
    #[error("Invalid config: {0}")]
    Invalid(String),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialize error
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
