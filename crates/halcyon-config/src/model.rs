// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Halcyon client.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Halcyon configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HalcyonConfig {
    /// Backend server endpoints and timeouts.
    #[serde(default)]
    pub server: ServerConfig,

    /// Chat session settings.
    #[serde(default)]
    pub chat: ChatConfig,

    /// Mood history and insight settings.
    #[serde(default)]
    pub mood: MoodConfig,

    /// Local storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// Backend server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Base URL for REST requests, e.g. `http://localhost:8000`.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Base URL for the chat WebSocket, e.g. `ws://localhost:8000`.
    #[serde(default = "default_ws_base_url")]
    pub ws_base_url: String,

    /// Per-request timeout in seconds for REST calls.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Timeout in seconds for the `status` health probe.
    #[serde(default = "default_health_timeout_secs")]
    pub health_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            ws_base_url: default_ws_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
            health_timeout_secs: default_health_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_ws_base_url() -> String {
    "ws://localhost:8000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    120
}

fn default_health_timeout_secs() -> u64 {
    3
}

/// Chat session configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChatConfig {
    /// Number of past messages fetched when a session opens.
    #[serde(default = "default_history_limit")]
    pub history_limit: u32,

    /// Print coping suggestions attached to assistant replies.
    #[serde(default = "default_show_suggestions")]
    pub show_suggestions: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            history_limit: default_history_limit(),
            show_suggestions: default_show_suggestions(),
        }
    }
}

fn default_history_limit() -> u32 {
    50
}

fn default_show_suggestions() -> bool {
    true
}

/// Mood history and insight configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct MoodConfig {
    /// Window in days for mood history and insight queries.
    #[serde(default = "default_history_days")]
    pub history_days: u32,

    /// Maximum number of mood transitions fetched per query.
    #[serde(default = "default_transitions_limit")]
    pub transitions_limit: u32,
}

impl Default for MoodConfig {
    fn default() -> Self {
        Self {
            history_days: default_history_days(),
            transitions_limit: default_transitions_limit(),
        }
    }
}

fn default_history_days() -> u32 {
    30
}

fn default_transitions_limit() -> u32 {
    20
}

/// Local storage configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database holding the local identity.
    #[serde(default = "default_database_path")]
    pub database_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
        }
    }
}

fn default_database_path() -> String {
    dirs::data_dir()
        .map(|p| p.join("halcyon").join("halcyon.db"))
        .unwrap_or_else(|| std::path::PathBuf::from("halcyon.db"))
        .to_string_lossy()
        .into_owned()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
