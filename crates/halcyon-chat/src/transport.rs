// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Duplex chat channel with request/response fallback.
//!
//! Client -> Server (JSON, one frame per send):
//! ```json
//! {"message": "I had a rough day"}
//! ```
//!
//! Server -> Client (JSON, one object per frame):
//! ```json
//! {"response": "...", "mood_detected": "sad", "crisis_detected": false, "suggestions": ["..."]}
//! ```
//!
//! The channel is best effort. If the connect fails, or the socket errors
//! later, every send degrades to `POST /api/chat` for the life of the
//! transport. There is no retry, no backoff, and no reconnection.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use halcyon_api::ApiClient;
use halcyon_api::types::{ChatReply, ChatRequest};
use halcyon_config::model::ServerConfig;
use halcyon_core::{HalcyonError, UserId};

type DuplexSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type DuplexSource = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// How a send was delivered.
#[derive(Debug)]
pub enum SendOutcome {
    /// Written to the duplex channel; the reply arrives later on
    /// [`ChatTransport::events`].
    ViaDuplex,
    /// Delivered via `POST /api/chat`; the reply came back synchronously.
    ViaFallback(ChatReply),
}

/// Inbound event from the duplex reader task.
#[derive(Debug)]
pub enum ChatEvent {
    /// A well-formed reply frame, fields passed through unchanged.
    Reply(ChatReply),
    /// An undecodable frame was logged and dropped. Callers clear their
    /// awaiting-reply state; nothing belongs in the transcript.
    Malformed,
    /// The channel ended. Emitted exactly once per connection, whether the
    /// server closed, the read errored, or [`ChatTransport::shutdown`] ran.
    Closed,
}

/// Chat delivery for one user session.
///
/// Owns the optional duplex socket, the reader task feeding
/// [`ChatTransport::events`], and the request/response fallback through
/// [`ApiClient`]. Identity is an explicit value; the transport holds the
/// `UserId` it was connected with and nothing global.
pub struct ChatTransport {
    api: ApiClient,
    user_id: UserId,
    session_id: Option<String>,
    writer: Option<DuplexSink>,
    events: mpsc::Receiver<ChatEvent>,
    duplex_up: Arc<AtomicBool>,
    cancel: CancellationToken,
}

impl ChatTransport {
    /// Opens the duplex channel at `{ws_base_url}/ws/chat/{user_id}`.
    ///
    /// A connect failure is logged and swallowed: the transport is still
    /// returned, [`ChatTransport::is_duplex`] reports `false`, and every
    /// send uses the fallback.
    pub async fn connect(server: &ServerConfig, api: ApiClient, user_id: UserId) -> Self {
        let (tx, rx) = mpsc::channel(64);
        let cancel = CancellationToken::new();
        let duplex_up = Arc::new(AtomicBool::new(false));

        let url = format!(
            "{}/ws/chat/{}",
            server.ws_base_url.trim_end_matches('/'),
            user_id
        );

        let writer = match connect_async(url.as_str()).await {
            Ok((stream, _)) => {
                debug!(url = %url, "duplex channel open");
                let (write, read) = stream.split();
                duplex_up.store(true, Ordering::SeqCst);
                spawn_reader(read, tx, duplex_up.clone(), cancel.clone());
                Some(write)
            }
            Err(e) => {
                warn!(error = %e, "duplex connect failed, degrading to request/response");
                // No reader task; dropping the sender ends the event stream.
                drop(tx);
                None
            }
        };

        Self {
            api,
            user_id,
            session_id: None,
            writer,
            events: rx,
            duplex_up,
            cancel,
        }
    }

    /// Delivers one user message.
    ///
    /// With the duplex channel open this writes exactly one frame and
    /// returns immediately; otherwise it issues exactly one `POST /api/chat`
    /// and returns the decoded reply. A frame write error closes the duplex
    /// side and the same call degrades to the fallback, so the message is
    /// never lost. Fallback errors propagate to the caller.
    pub async fn send(&mut self, text: &str) -> Result<SendOutcome, HalcyonError> {
        if self.duplex_up.load(Ordering::SeqCst)
            && let Some(writer) = self.writer.as_mut()
        {
            let frame = serde_json::json!({ "message": text }).to_string();
            match writer.send(Message::Text(frame.into())).await {
                Ok(()) => return Ok(SendOutcome::ViaDuplex),
                Err(e) => {
                    warn!(error = %e, "duplex write failed, degrading to request/response");
                    self.duplex_up.store(false, Ordering::SeqCst);
                    self.writer = None;
                }
            }
        }

        let request = ChatRequest {
            user_id: self.user_id.clone(),
            message: text.to_string(),
            session_id: self.session_id.clone(),
        };
        let reply = self.api.chat().send_message(&request).await?;
        if reply.session_id.is_some() {
            self.session_id = reply.session_id.clone();
        }
        Ok(SendOutcome::ViaFallback(reply))
    }

    /// The inbound side of the duplex channel, in arrival order.
    ///
    /// Without a duplex channel the stream ends immediately.
    pub fn events(&mut self) -> &mut mpsc::Receiver<ChatEvent> {
        &mut self.events
    }

    /// Whether the duplex channel is currently open.
    pub fn is_duplex(&self) -> bool {
        self.writer.is_some() && self.duplex_up.load(Ordering::SeqCst)
    }

    /// Cancels the reader task and closes the socket. Idempotent.
    pub async fn shutdown(&mut self) {
        self.cancel.cancel();
        self.duplex_up.store(false, Ordering::SeqCst);
        if let Some(mut writer) = self.writer.take()
            && let Err(e) = writer.send(Message::Close(None)).await
        {
            debug!(error = %e, "close frame not delivered");
        }
    }
}

/// Reads frames until close, error, or cancellation, then emits
/// [`ChatEvent::Closed`] exactly once.
fn spawn_reader(
    mut read: DuplexSource,
    events: mpsc::Sender<ChatEvent>,
    duplex_up: Arc<AtomicBool>,
    cancel: CancellationToken,
) {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    debug!("duplex reader cancelled");
                    break;
                }
                msg = read.next() => {
                    match msg {
                        Some(Ok(Message::Text(text))) => {
                            let raw: &str = &text;
                            let event = match serde_json::from_str::<ChatReply>(raw) {
                                Ok(reply) => ChatEvent::Reply(reply),
                                Err(e) => {
                                    warn!(error = %e, "dropping malformed duplex frame");
                                    ChatEvent::Malformed
                                }
                            };
                            if events.send(event).await.is_err() {
                                break;
                            }
                        }
                        Some(Ok(Message::Close(_))) => {
                            debug!("duplex channel closed by server");
                            break;
                        }
                        Some(Ok(_)) => {} // Ignore binary, ping (handled by tungstenite layer)
                        Some(Err(e)) => {
                            warn!(error = %e, "duplex read error");
                            break;
                        }
                        None => break,
                    }
                }
            }
        }
        duplex_up.store(false, Ordering::SeqCst);
        let _ = events.send(ChatEvent::Closed).await;
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    use tokio::net::TcpListener;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use halcyon_config::model::ServerConfig;

    fn api_for(base_url: &str) -> ApiClient {
        ApiClient::new(&ServerConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
        .unwrap()
    }

    fn uid() -> UserId {
        UserId("user_1700000000000".to_string())
    }

    /// Runs `handler` against the first WebSocket connection, then exits.
    async fn ws_server<F, Fut>(handler: F) -> std::net::SocketAddr
    where
        F: FnOnce(WebSocketStream<TcpStream>) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send,
    {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (stream, _) = listener.accept().await.unwrap();
            let ws = tokio_tungstenite::accept_async(stream).await.unwrap();
            handler(ws).await;
        });
        addr
    }

    async fn connect_to(addr: std::net::SocketAddr) -> ChatTransport {
        let server = ServerConfig {
            ws_base_url: format!("ws://{addr}"),
            ..Default::default()
        };
        // The HTTP side points at the default base URL; duplex tests never
        // touch it.
        ChatTransport::connect(&server, api_for("http://localhost:8000"), uid()).await
    }

    #[tokio::test]
    async fn duplex_send_writes_single_message_frame() {
        let addr = ws_server(|mut ws| async move {
            let frame = ws.next().await.unwrap().unwrap();
            assert_eq!(
                frame.into_text().unwrap().as_str(),
                r#"{"message":"I had a rough day"}"#
            );
            ws.send(Message::Text(
                r#"{"response":"That sounds heavy.","mood_detected":"sad","crisis_detected":false,"suggestions":["Take a short walk"]}"#.into(),
            ))
            .await
            .unwrap();
        })
        .await;

        let mut transport = connect_to(addr).await;
        assert!(transport.is_duplex());

        let outcome = transport.send("I had a rough day").await.unwrap();
        assert!(matches!(outcome, SendOutcome::ViaDuplex));

        match transport.events().recv().await {
            Some(ChatEvent::Reply(reply)) => {
                assert_eq!(reply.response, "That sounds heavy.");
                assert_eq!(reply.mood_detected.as_deref(), Some("sad"));
                assert!(reply.mood_intensity.is_none());
                assert!(!reply.crisis_detected);
                assert_eq!(reply.suggestions, vec!["Take a short walk"]);
            }
            other => panic!("expected reply event, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_frame_is_dropped_not_fatal() {
        let addr = ws_server(|mut ws| async move {
            ws.send(Message::Text("not json at all".into())).await.unwrap();
            ws.send(Message::Text(r#"{"response":"still here"}"#.into()))
                .await
                .unwrap();
            // Keep the socket open until the client has read both frames.
            while ws.next().await.is_some() {}
        })
        .await;

        let mut transport = connect_to(addr).await;

        assert!(matches!(
            transport.events().recv().await,
            Some(ChatEvent::Malformed)
        ));
        match transport.events().recv().await {
            Some(ChatEvent::Reply(reply)) => assert_eq!(reply.response, "still here"),
            other => panic!("expected reply after malformed frame, got {other:?}"),
        }

        transport.shutdown().await;
    }

    #[tokio::test]
    async fn frame_missing_response_field_is_malformed() {
        let addr = ws_server(|mut ws| async move {
            ws.send(Message::Text(r#"{"mood_detected":"happy"}"#.into()))
                .await
                .unwrap();
            while ws.next().await.is_some() {}
        })
        .await;

        let mut transport = connect_to(addr).await;
        assert!(matches!(
            transport.events().recv().await,
            Some(ChatEvent::Malformed)
        ));
        transport.shutdown().await;
    }

    #[tokio::test]
    async fn server_close_emits_closed_exactly_once() {
        let addr = ws_server(|mut ws| async move {
            ws.send(Message::Close(None)).await.unwrap();
        })
        .await;

        let mut transport = connect_to(addr).await;

        assert!(matches!(
            transport.events().recv().await,
            Some(ChatEvent::Closed)
        ));
        assert!(transport.events().recv().await.is_none());
        assert!(!transport.is_duplex());
    }

    #[tokio::test]
    async fn failed_connect_falls_back_to_http() {
        let http = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(serde_json::json!({
                "user_id": "user_1700000000000",
                "message": "hello"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": "Hi there",
                "session_id": "sess-1",
                "crisis_detected": false
            })))
            .expect(1)
            .mount(&http)
            .await;

        // Discard port, nothing listens there.
        let server = ServerConfig {
            ws_base_url: "ws://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let mut transport =
            ChatTransport::connect(&server, api_for(&http.uri()), uid()).await;

        assert!(!transport.is_duplex());
        assert!(transport.events().recv().await.is_none());

        match transport.send("hello").await.unwrap() {
            SendOutcome::ViaFallback(reply) => assert_eq!(reply.response, "Hi there"),
            SendOutcome::ViaDuplex => panic!("no duplex channel exists"),
        }
    }

    #[tokio::test]
    async fn fallback_echoes_session_id_once_known() {
        let http = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(serde_json::json!({
                "user_id": "user_1700000000000",
                "message": "first"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": "ok",
                "session_id": "sess-42"
            })))
            .expect(1)
            .mount(&http)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(serde_json::json!({
                "user_id": "user_1700000000000",
                "message": "second",
                "session_id": "sess-42"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": "ok again",
                "session_id": "sess-42"
            })))
            .expect(1)
            .mount(&http)
            .await;

        let server = ServerConfig {
            ws_base_url: "ws://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let mut transport =
            ChatTransport::connect(&server, api_for(&http.uri()), uid()).await;

        transport.send("first").await.unwrap();
        transport.send("second").await.unwrap();
    }

    #[tokio::test]
    async fn fallback_error_propagates_to_caller() {
        let http = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(serde_json::json!({"detail": "model overloaded"})),
            )
            .mount(&http)
            .await;

        let server = ServerConfig {
            ws_base_url: "ws://127.0.0.1:9".to_string(),
            ..Default::default()
        };
        let mut transport =
            ChatTransport::connect(&server, api_for(&http.uri()), uid()).await;

        let err = transport.send("hello").await.unwrap_err();
        match err {
            HalcyonError::Api { status, message, .. } => {
                assert_eq!(status, Some(500));
                assert!(message.contains("model overloaded"));
            }
            other => panic!("expected api error, got {other}"),
        }
    }

    #[tokio::test]
    async fn shutdown_is_idempotent() {
        let addr = ws_server(|mut ws| async move {
            while ws.next().await.is_some() {}
        })
        .await;

        let mut transport = connect_to(addr).await;
        assert!(transport.is_duplex());

        transport.shutdown().await;
        assert!(!transport.is_duplex());
        assert!(matches!(
            transport.events().recv().await,
            Some(ChatEvent::Closed)
        ));

        transport.shutdown().await;
        assert!(transport.events().recv().await.is_none());
    }
}
