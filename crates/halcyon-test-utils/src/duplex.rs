// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted duplex endpoint for exercising the WebSocket path.
//!
//! `DuplexServer` accepts one connection and answers each inbound frame
//! with the next scripted reply, capturing everything it received for
//! assertion. Frames past the end of the script go unanswered, which lets
//! tests model a silent backend.

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::Arc;

use futures::{SinkExt, StreamExt};
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tokio_tungstenite::tungstenite::Message;
use tracing::debug;

use halcyon_core::HalcyonError;

/// An in-process WebSocket server with a reply script and a capture queue.
pub struct DuplexServer {
    addr: SocketAddr,
    received: Arc<Mutex<Vec<String>>>,
}

impl DuplexServer {
    /// Binds an ephemeral port and serves the first connection.
    pub async fn start(replies: Vec<String>) -> Result<Self, HalcyonError> {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .map_err(|e| HalcyonError::Channel {
                message: "failed to bind duplex test server".to_string(),
                source: Some(Box::new(e)),
            })?;
        let addr = listener.local_addr().map_err(|e| HalcyonError::Channel {
            message: "failed to read duplex test server address".to_string(),
            source: Some(Box::new(e)),
        })?;

        let received = Arc::new(Mutex::new(Vec::new()));
        let captured = received.clone();

        tokio::spawn(async move {
            let Ok((stream, _)) = listener.accept().await else {
                return;
            };
            let Ok(mut ws) = tokio_tungstenite::accept_async(stream).await else {
                return;
            };
            let mut script: VecDeque<String> = replies.into();

            while let Some(Ok(msg)) = ws.next().await {
                match msg {
                    Message::Text(text) => {
                        captured.lock().await.push(text.as_str().to_string());
                        if let Some(reply) = script.pop_front()
                            && ws.send(Message::Text(reply.into())).await.is_err()
                        {
                            break;
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
            debug!("duplex test server connection ended");
        });

        Ok(Self { addr, received })
    }

    /// Base URL for `ServerConfig::ws_base_url`.
    pub fn ws_base_url(&self) -> String {
        format!("ws://{}", self.addr)
    }

    /// All inbound text frames, in arrival order.
    pub async fn received(&self) -> Vec<String> {
        self.received.lock().await.clone()
    }

    /// Count of inbound text frames.
    pub async fn received_count(&self) -> usize {
        self.received.lock().await.len()
    }
}
