// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared HTTP plumbing for the backend REST surface.
//!
//! [`ApiClient`] owns the single `reqwest::Client` (connection pool, default
//! headers, request timeout) and the error mapping every resource client
//! goes through. Resource clients borrow it via [`ApiClient::chat`] and
//! friends.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::debug;

use halcyon_config::model::ServerConfig;
use halcyon_core::HalcyonError;

use crate::chat::ChatApi;
use crate::mood::MoodApi;
use crate::spotify::SpotifyApi;
use crate::types::{ApiErrorBody, HealthResponse};
use crate::user::UserApi;
use crate::wellness::WellnessApi;

/// HTTP client for the Halcyon backend.
///
/// One instance per process; resource clients are cheap borrows of it.
/// Requests carry the configured timeout; there is no retry policy, every
/// failure is terminal for its operation.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the configured backend.
    pub fn new(config: &ServerConfig) -> Result<Self, HalcyonError> {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(|e| HalcyonError::api_transport("failed to build HTTP client", e))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The configured backend base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Chat operations.
    pub fn chat(&self) -> ChatApi<'_> {
        ChatApi::new(self)
    }

    /// Mood tracking operations.
    pub fn mood(&self) -> MoodApi<'_> {
        MoodApi::new(self)
    }

    /// User profile operations.
    pub fn user(&self) -> UserApi<'_> {
        UserApi::new(self)
    }

    /// Wellness recommendation operations.
    pub fn wellness(&self) -> WellnessApi<'_> {
        WellnessApi::new(self)
    }

    /// Music recommendation operations.
    pub fn spotify(&self) -> SpotifyApi<'_> {
        SpotifyApi::new(self)
    }

    /// Probes `GET /health` with its own short timeout, independent of the
    /// configured request timeout. Used by `halcyon status`.
    pub async fn health(&self, timeout: Duration) -> Result<HealthResponse, HalcyonError> {
        let builder = self
            .client
            .get(self.url("/health"))
            .timeout(timeout);
        self.execute(builder, "health").await
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.client
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// Sends a request and decodes the JSON response.
    ///
    /// Transport failures map to `Api` without a status; non-success
    /// statuses map to `Api` with the status and the backend's `detail`
    /// message when one is present; undecodable bodies map to `Decode`.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
        context: &'static str,
    ) -> Result<T, HalcyonError> {
        let response = builder.send().await.map_err(|e| {
            HalcyonError::api_transport(format!("{context} request failed: {e}"), e)
        })?;

        let status = response.status();
        debug!(status = %status, context, "response received");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<ApiErrorBody>(&body) {
                Ok(err) => format!("{context}: server returned {status}: {}", err.detail),
                Err(_) => format!("{context}: server returned {status}"),
            };
            return Err(HalcyonError::Api {
                status: Some(status.as_u16()),
                message,
                source: None,
            });
        }

        let body = response.text().await.map_err(|e| {
            HalcyonError::api_transport(format!("{context}: failed to read response body: {e}"), e)
        })?;
        serde_json::from_str(&body).map_err(|e| HalcyonError::Decode {
            context: context.to_string(),
            source: Box::new(e),
        })
    }
}
