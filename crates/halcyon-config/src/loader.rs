// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./halcyon.toml` > `~/.config/halcyon/halcyon.toml` > `/etc/halcyon/halcyon.toml`
//! with environment variable overrides via `HALCYON_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::HalcyonConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/halcyon/halcyon.toml` (system-wide)
/// 3. `~/.config/halcyon/halcyon.toml` (user XDG config)
/// 4. `./halcyon.toml` (local directory)
/// 5. `HALCYON_*` environment variables
pub fn load_config() -> Result<HalcyonConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HalcyonConfig::default()))
        .merge(Toml::file("/etc/halcyon/halcyon.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("halcyon/halcyon.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("halcyon.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env vars).
///
/// Useful for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<HalcyonConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HalcyonConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HalcyonConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HalcyonConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `HALCYON_SERVER_WS_BASE_URL` must map to
/// `server.ws_base_url`, not `server.ws.base.url`.
fn env_provider() -> Env {
    Env::prefixed("HALCYON_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: HALCYON_SERVER_BASE_URL -> "server_base_url"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("server_", "server.", 1)
            .replacen("chat_", "chat.", 1)
            .replacen("mood_", "mood.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("log_", "log.", 1);
        mapped.into()
    })
}
