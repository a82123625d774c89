// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat endpoints: single-shot send, transcript load, transcript clear.

use halcyon_core::{HalcyonError, UserId};

use crate::client::ApiClient;
use crate::types::{ChatHistory, ChatReply, ChatRequest, ClearHistoryResponse};

/// Client for `/api/chat` operations.
#[derive(Clone, Copy)]
pub struct ChatApi<'a> {
    api: &'a ApiClient,
}

impl<'a> ChatApi<'a> {
    pub(crate) fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    /// Sends one message via `POST /api/chat` and returns the decoded reply.
    ///
    /// This is the request/response path; the duplex channel lives in
    /// `halcyon-chat` and falls back to this call.
    pub async fn send_message(&self, request: &ChatRequest) -> Result<ChatReply, HalcyonError> {
        let builder = self.api.http().post(self.api.url("/api/chat")).json(request);
        self.api.execute(builder, "chat send").await
    }

    /// Loads the most recent transcript entries for a user.
    pub async fn history(&self, user_id: &UserId, limit: u32) -> Result<ChatHistory, HalcyonError> {
        let builder = self
            .api
            .http()
            .get(self.api.url(&format!("/api/chat/history/{}", user_id.as_str())))
            .query(&[("limit", limit)]);
        self.api.execute(builder, "chat history").await
    }

    /// Deletes the server-side transcript for a user.
    pub async fn clear_history(&self, user_id: &UserId) -> Result<ClearHistoryResponse, HalcyonError> {
        let builder = self
            .api
            .http()
            .delete(self.api.url(&format!("/api/chat/history/{}", user_id.as_str())));
        self.api.execute(builder, "chat clear").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use halcyon_config::model::ServerConfig;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> ApiClient {
        ApiClient::new(&ServerConfig {
            base_url: base_url.to_string(),
            ..ServerConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn send_message_posts_user_id_and_message_verbatim() {
        let server = MockServer::start().await;

        // The body matcher pins the exact JSON the endpoint must receive.
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(serde_json::json!({
                "user_id": "user_1700000000000",
                "message": "I had a rough day"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": "I'm sorry to hear that. Want to talk about it?",
                "session_id": "sess-1",
                "mood_detected": "sad",
                "mood_intensity": 64,
                "crisis_detected": false,
                "suggestions": ["Take a short walk"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let reply = client
            .chat()
            .send_message(&ChatRequest {
                user_id: UserId("user_1700000000000".into()),
                message: "I had a rough day".into(),
                session_id: None,
            })
            .await
            .unwrap();

        assert_eq!(reply.response, "I'm sorry to hear that. Want to talk about it?");
        assert_eq!(reply.session_id.as_deref(), Some("sess-1"));
        assert_eq!(reply.mood_detected.as_deref(), Some("sad"));
        assert_eq!(reply.mood_intensity, Some(64));
        assert!(!reply.crisis_detected);
        assert_eq!(reply.suggestions, vec!["Take a short walk"]);
    }

    #[tokio::test]
    async fn send_message_includes_session_id_once_known() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_json(serde_json::json!({
                "user_id": "user_1",
                "message": "still here",
                "session_id": "sess-9"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "response": "Good to hear from you again."
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let reply = client
            .chat()
            .send_message(&ChatRequest {
                user_id: UserId("user_1".into()),
                message: "still here".into(),
                session_id: Some("sess-9".into()),
            })
            .await
            .unwrap();
        assert_eq!(reply.response, "Good to hear from you again.");
    }

    #[tokio::test]
    async fn history_puts_user_in_path_and_limit_in_query() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/chat/history/user_42"))
            .and(query_param("limit", "50"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user_id": "user_42",
                "history": [
                    {"role": "user", "text": "hello", "timestamp": "2026-02-10T18:00:00Z"},
                    {"role": "assistant", "text": "hi, how are you feeling?", "timestamp": "2026-02-10T18:00:02Z"}
                ],
                "total_messages": 2
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let history = client
            .chat()
            .history(&UserId("user_42".into()), 50)
            .await
            .unwrap();

        assert_eq!(history.total_messages, 2);
        assert_eq!(history.history.len(), 2);
        assert_eq!(history.history[0].text, "hello");
        assert_eq!(history.history[1].role, halcyon_core::Role::Assistant);
    }

    #[tokio::test]
    async fn clear_history_sends_delete() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/api/chat/history/user_42"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "success": true
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let cleared = client
            .chat()
            .clear_history(&UserId("user_42".into()))
            .await
            .unwrap();
        assert!(cleared.success);
    }

    #[tokio::test]
    async fn backend_error_propagates_with_status() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
                "detail": "inference engine offline"
            })))
            .mount(&server)
            .await;

        let client = test_client(&server.uri());
        let err = client
            .chat()
            .send_message(&ChatRequest {
                user_id: UserId("user_1".into()),
                message: "hi".into(),
                session_id: None,
            })
            .await
            .unwrap_err();

        match err {
            HalcyonError::Api { status, message, .. } => {
                assert_eq!(status, Some(500));
                assert!(message.contains("inference engine offline"), "got: {message}");
            }
            other => panic!("expected Api error, got {other:?}"),
        }
    }
}
