//! Overlay client
//!
//! One client owns one connection. It is not meant to be shared between
//! concurrent senders; give each sender its own client (they can share the
//! launcher).

use std::io;
use std::sync::Arc;

use futures::SinkExt;
use serde::Serialize;
use tokio_util::codec::FramedWrite;

use ov_core::config::ClientConfig;
use ov_core::RendererLauncher;
use ov_protocol::{
    ClearMessage, JsonLineCodec, Message, ProtocolError, ShapeMessage, TextMessage,
    VectorMessage, VectorPoint,
};

use crate::error::ClientError;
use crate::policy::{policy, ErrorKind, Phase, Policy};
use crate::transport::{Connector, TcpConnector, Transport};

/// Whether the client currently holds a usable socket
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connected,
}

/// Best-effort, write-only session with the renderer
pub struct OverlayClient {
    address: String,
    launcher: Arc<dyn RendererLauncher>,
    connector: Arc<dyn Connector>,
    /// Present exactly while connected
    sink: Option<FramedWrite<Transport, JsonLineCodec>>,
}

impl OverlayClient {
    /// Create a client for the default renderer address
    pub fn new(launcher: Arc<dyn RendererLauncher>) -> Self {
        Self::with_address(launcher, ClientConfig::default().address())
    }

    /// Create a client for a custom address
    pub fn with_address(launcher: Arc<dyn RendererLauncher>, address: impl Into<String>) -> Self {
        Self::with_connector(launcher, address, Arc::new(TcpConnector))
    }

    /// Create a client with a custom transport
    pub fn with_connector(
        launcher: Arc<dyn RendererLauncher>,
        address: impl Into<String>,
        connector: Arc<dyn Connector>,
    ) -> Self {
        Self {
            address: address.into(),
            launcher,
            connector,
            sink: None,
        }
    }

    /// Get the address
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Current connection state
    pub fn state(&self) -> ConnectionState {
        if self.sink.is_some() {
            ConnectionState::Connected
        } else {
            ConnectionState::Disconnected
        }
    }

    /// Make sure the renderer is running and try to connect if needed
    ///
    /// A refused connection is logged and leaves the client disconnected
    /// without returning an error: the renderer may still be booting.
    pub async fn ensure_connected(&mut self) -> Result<(), ClientError> {
        self.launcher.ensure().await?;

        if self.sink.is_some() {
            return Ok(());
        }

        tracing::debug!("Connecting to renderer at {}", self.address);

        match self.connector.connect(&self.address).await {
            Ok(transport) => {
                self.sink = Some(FramedWrite::new(transport, JsonLineCodec::new()));
                tracing::debug!("Connected to renderer at {}", self.address);
                Ok(())
            }
            Err(e) => match policy(Phase::Connect, ErrorKind::of_io(&e)) {
                Policy::Swallow => {
                    tracing::warn!("Connection to renderer at {} refused", self.address);
                    Ok(())
                }
                Policy::RetryOnce | Policy::Raise => Err(ClientError::Connect {
                    address: self.address.clone(),
                    source: e,
                }),
            },
        }
    }

    /// Send any JSON-serializable payload as one line
    ///
    /// A transport failure drops the connection and the whole
    /// connect-and-send sequence is retried once. A second failure is
    /// returned as [`ClientError::DoubleFault`].
    pub async fn send_raw<T>(&mut self, payload: &T) -> Result<(), ClientError>
    where
        T: Serialize + ?Sized + Sync,
    {
        let mut retried = false;

        loop {
            self.ensure_connected().await?;

            let err = match self.write(payload).await {
                Ok(()) => return Ok(()),
                Err(e) => e,
            };

            match policy(Phase::Send, ErrorKind::of_protocol(&err)) {
                Policy::RetryOnce if !retried => {
                    tracing::warn!("Send to renderer failed, retrying: {}", err);
                    retried = true;
                }
                Policy::RetryOnce => {
                    tracing::error!("Double fault sending to renderer, not retrying: {}", err);
                    return Err(ClientError::DoubleFault { source: err });
                }
                Policy::Raise => return Err(ClientError::Protocol(err)),
                Policy::Swallow => return Ok(()),
            }
        }
    }

    /// Send a typed draw command
    pub async fn send(&mut self, message: impl Into<Message>) -> Result<(), ClientError> {
        let message = message.into();
        tracing::debug!(id = message.id(), "Sending draw command");
        self.send_raw(&message).await
    }

    /// Draw text with the default size and TTL
    pub async fn send_message(
        &mut self,
        id: &str,
        text: &str,
        color: &str,
        x: u32,
        y: u32,
    ) -> Result<(), ClientError> {
        self.send(TextMessage::new(id, text, color, x, y)).await
    }

    /// Draw a shape
    #[allow(clippy::too_many_arguments)]
    pub async fn send_shape(
        &mut self,
        id: &str,
        shape: &str,
        color: &str,
        fill: &str,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        ttl: i64,
    ) -> Result<(), ClientError> {
        self.send(ShapeMessage::new(id, shape, color, fill, x, y, w, h, ttl))
            .await
    }

    /// Draw a marker path
    pub async fn send_vector(
        &mut self,
        id: &str,
        color: &str,
        points: Vec<VectorPoint>,
        ttl: i64,
    ) -> Result<(), ClientError> {
        self.send(VectorMessage::new(id, color, points, ttl)).await
    }

    /// Remove the element with the given id
    pub async fn clear(&mut self, id: &str) -> Result<(), ClientError> {
        self.send(ClearMessage::new(id)).await
    }

    /// Write one line; a transport failure drops the connection
    ///
    /// Encoding happens before anything reaches the socket, so a payload
    /// that fails to serialize leaves the connection in place.
    async fn write<T>(&mut self, payload: &T) -> Result<(), ProtocolError>
    where
        T: Serialize + ?Sized + Sync,
    {
        let Some(sink) = self.sink.as_mut() else {
            return Err(ProtocolError::Io(io::Error::new(
                io::ErrorKind::NotConnected,
                "not connected to renderer",
            )));
        };

        let result = sink.send(payload).await;
        if let Err(ProtocolError::Io(e)) = &result {
            tracing::debug!("Dropping renderer connection: {}", e);
            self.sink = None;
        }
        result
    }
}

impl std::fmt::Debug for OverlayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverlayClient")
            .field("address", &self.address)
            .field("state", &self.state())
            .finish()
    }
}
