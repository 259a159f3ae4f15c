//! Client connection configuration

use serde::{Deserialize, Serialize};

/// Host the renderer listens on
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Port the renderer listens on
pub const DEFAULT_PORT: u16 = 5010;

/// Target address for overlay clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ClientConfig {
    /// Get the socket address (host:port)
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
