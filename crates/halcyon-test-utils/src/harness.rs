// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a complete client stack: temp SQLite identity
//! store, canned REST backend, optional scripted duplex endpoint, and a
//! configuration wired to all of them. `connect_chat()` hands back a real
//! transport against the scripted services.

use tempfile::TempDir;

use halcyon_api::ApiClient;
use halcyon_chat::ChatTransport;
use halcyon_config::model::{HalcyonConfig, ServerConfig, StorageConfig};
use halcyon_core::types::Identity;
use halcyon_core::{HalcyonError, IdentityStore};
use halcyon_storage::SqliteIdentityStore;

use crate::backend::MockBackend;
use crate::duplex::DuplexServer;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    chat_replies: Vec<serde_json::Value>,
    duplex_replies: Option<Vec<String>>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            chat_replies: Vec::new(),
            duplex_replies: None,
        }
    }

    /// Script REST chat replies, served one per `POST /api/chat` in order.
    pub fn with_chat_replies(mut self, replies: Vec<serde_json::Value>) -> Self {
        self.chat_replies = replies;
        self
    }

    /// Run a duplex endpoint answering each frame with the next reply.
    /// Without this the config points at a dead port and every send falls
    /// back to REST.
    pub fn with_duplex(mut self, replies: Vec<String>) -> Self {
        self.duplex_replies = Some(replies);
        self
    }

    /// Build the test harness, creating all required services.
    pub async fn build(self) -> Result<TestHarness, HalcyonError> {
        let temp_dir =
            TempDir::new().map_err(|e| HalcyonError::Storage { source: e.into() })?;
        let db_path = temp_dir.path().join("halcyon.db");

        let backend = MockBackend::start().await;
        for reply in self.chat_replies {
            backend.stub_chat_reply(reply).await;
        }

        let duplex = match self.duplex_replies {
            Some(replies) => Some(DuplexServer::start(replies).await?),
            None => None,
        };
        let ws_base_url = match &duplex {
            Some(server) => server.ws_base_url(),
            // Discard port, nothing listens there.
            None => "ws://127.0.0.1:9".to_string(),
        };

        let config = HalcyonConfig {
            server: ServerConfig {
                base_url: backend.uri(),
                ws_base_url,
                ..ServerConfig::default()
            },
            storage: StorageConfig {
                database_path: db_path.to_string_lossy().to_string(),
            },
            ..HalcyonConfig::default()
        };

        let store = SqliteIdentityStore::open(&config.storage).await?;
        let identity = Identity::load_or_create(&store).await;

        Ok(TestHarness {
            backend,
            duplex,
            store,
            identity,
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with scripted services and temp storage.
pub struct TestHarness {
    /// The canned REST backend.
    pub backend: MockBackend,
    /// The scripted duplex endpoint, when the builder enabled one.
    pub duplex: Option<DuplexServer>,
    /// Identity store on the temp database.
    pub store: SqliteIdentityStore,
    /// The identity loaded (generated) at build time.
    pub identity: Identity,
    /// Configuration wired to the scripted services.
    pub config: HalcyonConfig,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// An API client against the canned backend.
    pub fn api(&self) -> Result<ApiClient, HalcyonError> {
        ApiClient::new(&self.config.server)
    }

    /// A chat transport wired to the harness services and identity.
    pub async fn connect_chat(&self) -> Result<ChatTransport, HalcyonError> {
        let api = self.api()?;
        Ok(ChatTransport::connect(&self.config.server, api, self.identity.user_id.clone()).await)
    }

    /// Reload the identity from the store, as a fresh launch would.
    pub async fn reload_identity(&self) -> Result<Option<Identity>, HalcyonError> {
        self.store.load().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use halcyon_chat::{ChatEvent, SendOutcome};

    #[tokio::test]
    async fn builder_creates_working_environment() {
        let harness = TestHarness::builder().build().await.unwrap();
        assert!(harness.identity.user_id.as_str().starts_with("user_"));
        assert!(std::path::Path::new(&harness.config.storage.database_path).exists());
    }

    #[tokio::test]
    async fn identity_is_stable_across_reloads() {
        let harness = TestHarness::builder().build().await.unwrap();
        let reloaded = harness.reload_identity().await.unwrap().unwrap();
        assert_eq!(reloaded.user_id, harness.identity.user_id);
    }

    #[tokio::test]
    async fn scripted_chat_reply_serves_fallback_send() {
        let harness = TestHarness::builder()
            .with_chat_replies(vec![serde_json::json!({
                "response": "scripted",
                "session_id": "sess-1"
            })])
            .build()
            .await
            .unwrap();

        let mut transport = harness.connect_chat().await.unwrap();
        assert!(!transport.is_duplex());

        match transport.send("hello").await.unwrap() {
            SendOutcome::ViaFallback(reply) => assert_eq!(reply.response, "scripted"),
            SendOutcome::ViaDuplex => panic!("harness built without duplex"),
        }
    }

    #[tokio::test]
    async fn duplex_script_answers_and_captures() {
        let harness = TestHarness::builder()
            .with_duplex(vec![r#"{"response":"from the script"}"#.to_string()])
            .build()
            .await
            .unwrap();

        let mut transport = harness.connect_chat().await.unwrap();
        assert!(transport.is_duplex());

        let outcome = transport.send("over the wire").await.unwrap();
        assert!(matches!(outcome, SendOutcome::ViaDuplex));

        match transport.events().recv().await {
            Some(ChatEvent::Reply(reply)) => assert_eq!(reply.response, "from the script"),
            other => panic!("expected scripted reply, got {other:?}"),
        }

        let frames = harness.duplex.as_ref().unwrap().received().await;
        assert_eq!(frames, vec![r#"{"message":"over the wire"}"#.to_string()]);
    }
}
