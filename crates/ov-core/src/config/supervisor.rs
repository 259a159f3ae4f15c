//! Renderer process configuration

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::serde_utils::duration_millis;

/// Executable name the renderer is built under
pub const DEFAULT_BINARY_NAME: &str = "edmcoverlay";

/// How the supervisor finds, starts and waits for the renderer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupervisorConfig {
    /// Directory the renderer was installed into; the executable is expected
    /// at `<install_dir>/target/release/<binary_name>`
    pub install_dir: Option<PathBuf>,

    /// Explicit executable path (takes precedence over `install_dir`)
    pub renderer_path: Option<PathBuf>,

    /// Executable file name, without platform suffix
    pub binary_name: String,

    /// Number of output lines to read while waiting for readiness
    pub handshake_lines: usize,

    /// Pause after the readiness line before the socket is used
    #[serde(rename = "settle_delay_ms", with = "duration_millis")]
    pub settle_delay: Duration,

    /// Upper bound on the whole readiness handshake
    #[serde(rename = "handshake_timeout_ms", with = "duration_millis")]
    pub handshake_timeout: Duration,
}

impl Default for SupervisorConfig {
    fn default() -> Self {
        Self {
            install_dir: None,
            renderer_path: None,
            binary_name: DEFAULT_BINARY_NAME.to_string(),
            handshake_lines: 5,
            settle_delay: Duration::from_millis(10),
            handshake_timeout: Duration::from_secs(10),
        }
    }
}

impl SupervisorConfig {
    /// Config that runs the executable at `path` with default handshake settings
    pub fn with_renderer_path(path: impl Into<PathBuf>) -> Self {
        Self {
            renderer_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Resolve the path the renderer executable should live at
    ///
    /// Without an explicit path or install directory, the directory holding
    /// the current executable is used as the install directory.
    pub fn resolve_renderer_path(&self) -> PathBuf {
        if let Some(path) = &self.renderer_path {
            return path.clone();
        }

        let install_dir = self.install_dir.clone().unwrap_or_else(|| {
            std::env::current_exe()
                .ok()
                .and_then(|exe| exe.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from("."))
        });

        install_dir
            .join("target")
            .join("release")
            .join(format!("{}{}", self.binary_name, std::env::consts::EXE_SUFFIX))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let config = SupervisorConfig {
            install_dir: Some(PathBuf::from("/plugins/overlay")),
            renderer_path: Some(PathBuf::from("/usr/local/bin/renderer")),
            ..SupervisorConfig::default()
        };
        assert_eq!(
            config.resolve_renderer_path(),
            PathBuf::from("/usr/local/bin/renderer")
        );
    }

    #[test]
    fn test_install_dir_layout() {
        let config = SupervisorConfig {
            install_dir: Some(PathBuf::from("/plugins/overlay")),
            ..SupervisorConfig::default()
        };
        let expected = PathBuf::from("/plugins/overlay/target/release")
            .join(format!("edmcoverlay{}", std::env::consts::EXE_SUFFIX));
        assert_eq!(config.resolve_renderer_path(), expected);
    }

    #[test]
    fn test_defaults() {
        let config = SupervisorConfig::default();
        assert_eq!(config.handshake_lines, 5);
        assert_eq!(config.settle_delay, Duration::from_millis(10));
    }
}
