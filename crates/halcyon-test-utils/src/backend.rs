// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned REST backend for deterministic testing.
//!
//! `MockBackend` wraps a [`wiremock::MockServer`] with one stub helper per
//! backend route, so tests read as "given the backend answers X" instead of
//! repeating matcher plumbing. Unstubbed routes return wiremock's default
//! 404, which exercises the error paths.

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// A scripted stand-in for the Halcyon backend.
pub struct MockBackend {
    server: MockServer,
}

impl MockBackend {
    /// Starts the server on an ephemeral local port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Base URL for `ServerConfig::base_url`.
    pub fn uri(&self) -> String {
        self.server.uri()
    }

    /// The underlying server, for custom matchers the helpers don't cover.
    pub fn server(&self) -> &MockServer {
        &self.server
    }

    /// `GET /health` answers healthy.
    pub async fn stub_health_ok(&self) {
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "status": "healthy",
                "timestamp": "2026-01-01T00:00:00Z"
            })))
            .mount(&self.server)
            .await;
    }

    /// `POST /api/chat` answers `reply`. Mount several in order to script a
    /// conversation; each stub serves exactly one request.
    pub async fn stub_chat_reply(&self, reply: Value) {
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply))
            .up_to_n_times(1)
            .mount(&self.server)
            .await;
    }

    /// `GET /api/chat/history/{user_id}` answers `body`.
    pub async fn stub_chat_history(&self, user_id: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/chat/history/{user_id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// `DELETE /api/chat/history/{user_id}` answers success.
    pub async fn stub_clear_history(&self, user_id: &str) {
        Mock::given(method("DELETE"))
            .and(path(format!("/api/chat/history/{user_id}")))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({"success": true})),
            )
            .mount(&self.server)
            .await;
    }

    /// `POST /api/mood/log` answers `body`.
    pub async fn stub_mood_log(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path("/api/mood/log"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// `GET /api/mood/history/{user_id}` answers `body`.
    pub async fn stub_mood_history(&self, user_id: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/mood/history/{user_id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// `GET /api/mood/insights/{user_id}` answers `body`.
    pub async fn stub_mood_insights(&self, user_id: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/mood/insights/{user_id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// `GET /api/mood/transitions/{user_id}` answers `body`.
    pub async fn stub_mood_transitions(&self, user_id: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/mood/transitions/{user_id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// `GET /api/mood/current/{user_id}` answers `body`.
    pub async fn stub_current_mood(&self, user_id: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/mood/current/{user_id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// `GET /api/user/profile/{user_id}` answers `body`.
    pub async fn stub_profile(&self, user_id: &str, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/api/user/profile/{user_id}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// `POST /api/user/profile` answers `body`.
    pub async fn stub_update_profile(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path("/api/user/profile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// `POST /api/wellness/recommendations` answers `body`.
    pub async fn stub_wellness_recommendations(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path("/api/wellness/recommendations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// `GET /api/wellness/activities` answers `body`.
    pub async fn stub_wellness_activities(&self, body: Value) {
        Mock::given(method("GET"))
            .and(path("/api/wellness/activities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// `POST /api/spotify/recommend` answers `body`.
    pub async fn stub_spotify_recommend(&self, body: Value) {
        Mock::given(method("POST"))
            .and(path("/api/spotify/recommend"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Any request to `route` fails with `status` and a FastAPI-style
    /// `{"detail": ...}` body.
    pub async fn stub_error(&self, http_method: &str, route: &str, status: u16, detail: &str) {
        Mock::given(method(http_method))
            .and(path(route))
            .respond_with(
                ResponseTemplate::new(status)
                    .set_body_json(serde_json::json!({"detail": detail})),
            )
            .mount(&self.server)
            .await;
    }
}
