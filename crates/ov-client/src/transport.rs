//! Transport seam between the client and the socket

use std::io;

use async_trait::async_trait;
use tokio::io::AsyncWrite;
use tokio::net::TcpStream;

/// Write half of a renderer connection
pub type Transport = Box<dyn AsyncWrite + Send + Unpin>;

/// Opens connections to the renderer
#[async_trait]
pub trait Connector: Send + Sync {
    /// Connect to `address` (`host:port`)
    async fn connect(&self, address: &str) -> io::Result<Transport>;
}

/// Plain TCP, no TLS, no authentication
#[derive(Debug, Clone, Copy, Default)]
pub struct TcpConnector;

#[async_trait]
impl Connector for TcpConnector {
    async fn connect(&self, address: &str) -> io::Result<Transport> {
        let stream = TcpStream::connect(address).await?;
        // One small write per command; don't let Nagle hold it back
        stream.set_nodelay(true)?;
        Ok(Box::new(stream))
    }
}
