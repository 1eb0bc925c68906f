use async_trait::async_trait;
use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::trace;

use crate::domain::{FeedSession, FeedTransport};
use crate::error::TransportError;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// WebSocket transport for streaming market data
/// Infrastructure component - handles WebSocket communication
#[derive(Debug, Clone, Copy, Default)]
pub struct WsTransport;

impl WsTransport {
    pub fn new() -> Self {
        WsTransport
    }
}

#[async_trait]
impl FeedTransport for WsTransport {
    type Session = WsSession;

    async fn connect(&self, endpoint: &str) -> Result<WsSession, TransportError> {
        let (ws_stream, _) = connect_async(endpoint)
            .await
            .map_err(|e| TransportError::Connect(e.to_string()))?;
        let (write, read) = ws_stream.split();
        Ok(WsSession { write, read })
    }
}

/// One live WebSocket connection
///
/// Pings are answered here; only text frames reach the caller.
pub struct WsSession {
    write: SplitSink<WsStream, Message>,
    read: SplitStream<WsStream>,
}

#[async_trait]
impl FeedSession for WsSession {
    async fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        self.write
            .send(Message::Text(text.into()))
            .await
            .map_err(|e| TransportError::Send(e.to_string()))
    }

    async fn next_text(&mut self) -> Option<Result<String, TransportError>> {
        while let Some(msg) = self.read.next().await {
            match msg {
                Ok(Message::Text(text)) => return Some(Ok(text.to_string())),
                Ok(Message::Binary(data)) => match String::from_utf8(data.to_vec()) {
                    Ok(text) => return Some(Ok(text)),
                    Err(_) => trace!(len = data.len(), "Ignoring non-UTF-8 binary frame"),
                },
                Ok(Message::Ping(data)) => {
                    trace!("Received ping: {:?}", data);
                    if let Err(e) = self.write.send(Message::Pong(data)).await {
                        return Some(Err(TransportError::Send(e.to_string())));
                    }
                }
                Ok(Message::Close(frame)) => {
                    trace!("Received close: {:?}", frame);
                    return None;
                }
                Ok(_) => {}
                Err(e) => return Some(Err(TransportError::Receive(e.to_string()))),
            }
        }
        None
    }
}
