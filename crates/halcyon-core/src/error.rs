// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Halcyon client.

use thiserror::Error;

/// The primary error type used across the Halcyon workspace.
///
/// Every failure is terminal for its single operation: there is no retry
/// policy and no circuit breaking anywhere in the client. Callers either
/// surface the error (mood submission, profile update) or log it and
/// degrade to an empty view.
#[derive(Debug, Error)]
pub enum HalcyonError {
    /// Configuration errors (invalid TOML, bad URLs, out-of-range values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Backend API errors: transport failure or a non-success HTTP status.
    #[error("api error: {message}")]
    Api {
        /// HTTP status code, when the request reached the server.
        status: Option<u16>,
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A server payload that could not be decoded into the expected shape.
    #[error("malformed payload from {context}: {source}")]
    Decode {
        /// Which operation produced the payload (for diagnostics only).
        context: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Duplex channel errors (connect failure, send failure, frame encode).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Local state persistence errors (database open, query failure).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HalcyonError {
    /// Shorthand for an [`HalcyonError::Api`] without an HTTP status,
    /// i.e. the request never produced a response.
    pub fn api_transport(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        HalcyonError::Api {
            status: None,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
