//! WebSocket transport over `tokio-tungstenite`.
//!
//! Connecting is lazy: [`WsTransportFactory::open`] only records the address,
//! the handshake happens on the first [`Transport::next_event`] call. Every
//! failure, before or after the handshake, is reported as
//! [`TransportEvent::Closed`].

use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, warn};
use wittr_core::{Transport, TransportEvent, TransportFactory};

use crate::error::TransportError;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Upper bound on a single handshake, so a black-holed host still closes.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

/// Opens [`WsTransport`]s.
#[derive(Debug, Clone)]
pub struct WsTransportFactory {
    connect_timeout: Duration,
}

impl WsTransportFactory {
    pub const fn new() -> Self {
        Self {
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }
}

impl Default for WsTransportFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TransportFactory for WsTransportFactory {
    fn open(&self, address: &str) -> Box<dyn Transport> {
        Box::new(WsTransport::new(address, self.connect_timeout))
    }
}

enum WsState {
    Pending,
    Open(WsStream),
    Closed,
}

/// One WebSocket session.
pub struct WsTransport {
    address: String,
    connect_timeout: Duration,
    state: WsState,
}

impl WsTransport {
    pub fn new(address: &str, connect_timeout: Duration) -> Self {
        Self {
            address: address.to_string(),
            connect_timeout,
            state: WsState::Pending,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    async fn connect(&mut self) -> TransportEvent {
        let handshake = timeout(self.connect_timeout, connect_async(self.address.as_str())).await;

        match handshake {
            Ok(Ok((stream, response))) => {
                debug!(address = %self.address, status = %response.status(), "WebSocket connected");
                self.state = WsState::Open(stream);
                TransportEvent::Opened
            }
            Ok(Err(source)) => {
                let err = TransportError::Handshake {
                    address: self.address.clone(),
                    source,
                };
                debug!(error = %err, "WebSocket handshake failed");
                TransportEvent::Closed
            }
            Err(_) => {
                debug!(
                    address = %self.address,
                    timeout = ?self.connect_timeout,
                    "WebSocket handshake timed out"
                );
                TransportEvent::Closed
            }
        }
    }
}

#[async_trait]
impl Transport for WsTransport {
    async fn next_event(&mut self) -> Option<TransportEvent> {
        let event = match &mut self.state {
            WsState::Closed => return None,
            WsState::Open(stream) => read_next(stream, &self.address).await,
            WsState::Pending => self.connect().await,
        };

        if event == TransportEvent::Closed {
            self.state = WsState::Closed;
        }
        Some(event)
    }

    async fn close(&mut self) {
        if let WsState::Open(stream) = &mut self.state {
            if let Err(e) = stream.close(None).await {
                debug!(address = %self.address, error = %e, "WebSocket close handshake failed");
            }
        }
        self.state = WsState::Closed;
    }
}

/// Read until the next text payload or the end of the stream.
async fn read_next(stream: &mut WsStream, address: &str) -> TransportEvent {
    loop {
        match stream.next().await {
            Some(Ok(Message::Text(text))) => return TransportEvent::Frame(text.as_str().to_owned()),
            Some(Ok(Message::Binary(bytes))) => match String::from_utf8(bytes.to_vec()) {
                Ok(text) => return TransportEvent::Frame(text),
                Err(_) => {
                    let err = TransportError::NonTextFrame { len: bytes.len() };
                    warn!(%address, error = %err, "Ignoring binary frame");
                }
            },
            Some(Ok(Message::Close(frame))) => {
                debug!(%address, ?frame, "WebSocket closed by server");
                return TransportEvent::Closed;
            }
            // Ping replies are queued by tungstenite itself
            Some(Ok(Message::Ping(_) | Message::Pong(_) | Message::Frame(_))) => {}
            Some(Err(source)) => {
                let err = TransportError::from(source);
                debug!(%address, error = %err, "WebSocket stream ended with error");
                return TransportEvent::Closed;
            }
            None => {
                debug!(%address, "WebSocket stream ended");
                return TransportEvent::Closed;
            }
        }
    }
}
