use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::StreamExt;
use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{debug, warn};

use crate::event::LiveUpdate;

/// Simple WebSocket abstraction - all we care about is send/receive
#[async_trait]
pub trait SocketWrapper: Send {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError>;

    /// Next text message from the client, `None` once it is gone.
    async fn receive_message(&mut self) -> Result<Option<String>, SocketError>;

    async fn close(&mut self) -> Result<(), SocketError>;
}

#[derive(Debug)]
pub enum SocketError {
    SendFailed(String),
    ReceiveFailed(String),
    Encode(serde_json::Error),
}

#[async_trait]
impl SocketWrapper for WebSocket {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
        self.send(Message::Text(message))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn receive_message(&mut self) -> Result<Option<String>, SocketError> {
        loop {
            match self.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(text)),
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                Some(Ok(_)) => continue, // ping/pong/binary
                Some(Err(e)) => return Err(SocketError::ReceiveFailed(e.to_string())),
            }
        }
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.send(Message::Close(None))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }
}

/// One display client. Forwards live updates as JSON until either side
/// goes away.
pub struct LiveConnection {
    socket: Box<dyn SocketWrapper>,
    updates: broadcast::Receiver<LiveUpdate>,
}

impl LiveConnection {
    pub fn new(socket: Box<dyn SocketWrapper>, updates: broadcast::Receiver<LiveUpdate>) -> Self {
        Self { socket, updates }
    }

    pub async fn send_json<T: serde::Serialize>(&mut self, value: &T) -> Result<(), SocketError> {
        let text = serde_json::to_string(value).map_err(SocketError::Encode)?;
        self.socket.send_message(text).await
    }

    pub async fn run(mut self) -> Result<(), SocketError> {
        loop {
            tokio::select! {
                update = self.updates.recv() => {
                    match update {
                        Ok(update) => self.send_json(&update).await?,
                        Err(RecvError::Lagged(skipped)) => {
                            // Skipped updates are gone; the client can refetch GET /session.
                            warn!(skipped, "Live client lagging behind");
                        }
                        Err(RecvError::Closed) => break,
                    }
                }

                msg = self.socket.receive_message() => {
                    match msg {
                        Ok(Some(message)) => debug!(%message, "Ignoring message from display client"),
                        Ok(None) => break,
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        let _ = self.socket.close().await;
        Ok(())
    }
}
