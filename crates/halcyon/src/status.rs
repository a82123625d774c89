// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `halcyon status` command implementation.
//!
//! Probes the backend health endpoint and prints it next to the local
//! identity and the endpoints in use. Falls back gracefully when the
//! backend is not running.

use std::io::IsTerminal;
use std::time::Duration;

use halcyon_api::ApiClient;
use halcyon_config::model::HalcyonConfig;
use halcyon_core::error::HalcyonError;
use halcyon_core::types::Identity;
use serde::Serialize;

/// Structured status output for `--json` mode.
#[derive(Debug, Serialize)]
pub struct StatusReport {
    pub online: bool,
    pub status: String,
    pub backend_timestamp: Option<String>,
    pub base_url: String,
    pub ws_base_url: String,
    pub user_id: String,
    pub display_name: Option<String>,
    pub database_path: String,
}

/// The `user_123 (Ada)` caption shown on the identity line.
fn identity_caption(identity: &Identity) -> String {
    match &identity.display_name {
        Some(name) => format!("{} ({name})", identity.user_id),
        None => identity.user_id.to_string(),
    }
}

/// Run the `halcyon status` command.
///
/// Probes `/health` with a short timeout and displays backend state.
/// If `--json` is passed, outputs structured JSON for scripting.
/// If `--plain` is passed or stdout is not a TTY, disables colors.
pub async fn run_status(
    config: &HalcyonConfig,
    identity: &Identity,
    json: bool,
    plain: bool,
) -> Result<(), HalcyonError> {
    let api = ApiClient::new(&config.server)?;
    let timeout = Duration::from_secs(config.server.health_timeout_secs);

    match api.health(timeout).await {
        Ok(health) => {
            if json {
                let report = StatusReport {
                    online: true,
                    status: health.status.clone(),
                    backend_timestamp: Some(health.timestamp),
                    base_url: config.server.base_url.clone(),
                    ws_base_url: config.server.ws_base_url.clone(),
                    user_id: identity.user_id.to_string(),
                    display_name: identity.display_name.clone(),
                    database_path: config.storage.database_path.clone(),
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
                );
            } else {
                let use_color = !plain && std::io::stdout().is_terminal();
                print_status_online(&health.status, config, identity, use_color);
            }
        }
        Err(_) => {
            if json {
                let report = StatusReport {
                    online: false,
                    status: "unreachable".to_string(),
                    backend_timestamp: None,
                    base_url: config.server.base_url.clone(),
                    ws_base_url: config.server.ws_base_url.clone(),
                    user_id: identity.user_id.to_string(),
                    display_name: identity.display_name.clone(),
                    database_path: config.storage.database_path.clone(),
                };
                println!(
                    "{}",
                    serde_json::to_string_pretty(&report).unwrap_or_else(|_| "{}".to_string())
                );
            } else {
                let use_color = !plain && std::io::stdout().is_terminal();
                print_status_offline(config, identity, use_color);
            }
        }
    }

    Ok(())
}

/// Print reachable-backend status with optional colors.
fn print_status_online(status: &str, config: &HalcyonConfig, identity: &Identity, use_color: bool) {
    println!();
    println!("  halcyon status");
    println!("  {}", "-".repeat(35));

    if use_color {
        use colored::Colorize;
        println!(
            "    Backend:  {} {} ({})",
            "✓".green(),
            status.green(),
            config.server.base_url
        );
    } else {
        println!(
            "    Backend:  [OK] {status} ({})",
            config.server.base_url
        );
    }

    println!("    Duplex:   {}", config.server.ws_base_url);
    println!("    User:     {}", identity_caption(identity));
    println!("    Storage:  {}", config.storage.database_path);
    println!();
}

/// Print unreachable-backend status with optional colors.
fn print_status_offline(config: &HalcyonConfig, identity: &Identity, use_color: bool) {
    println!();
    println!("  halcyon status");
    println!("  {}", "-".repeat(35));

    if use_color {
        use colored::Colorize;
        println!("    Backend:  {} {}", "✗".red(), "unreachable".red());
    } else {
        println!("    Backend:  [FAIL] unreachable");
    }

    println!("    Endpoint: {}/health", config.server.base_url);
    println!("    User:     {}", identity_caption(identity));
    println!();
    println!("  Check server.base_url in halcyon.toml");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use halcyon_core::types::UserId;

    #[test]
    fn identity_caption_includes_display_name() {
        let identity = Identity {
            user_id: UserId("user_1700000000000".to_string()),
            display_name: Some("Ada".to_string()),
        };
        assert_eq!(identity_caption(&identity), "user_1700000000000 (Ada)");
    }

    #[test]
    fn identity_caption_without_display_name() {
        let identity = Identity {
            user_id: UserId("user_1700000000000".to_string()),
            display_name: None,
        };
        assert_eq!(identity_caption(&identity), "user_1700000000000");
    }

    #[test]
    fn status_report_serializes() {
        let report = StatusReport {
            online: true,
            status: "healthy".to_string(),
            backend_timestamp: Some("2026-01-01T00:00:00Z".to_string()),
            base_url: "http://localhost:8000".to_string(),
            ws_base_url: "ws://localhost:8000".to_string(),
            user_id: "user_1".to_string(),
            display_name: None,
            database_path: "/tmp/halcyon.db".to_string(),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"online\":true"));
        assert!(json.contains("\"status\":\"healthy\""));
    }

    #[test]
    fn status_report_offline_serializes() {
        let report = StatusReport {
            online: false,
            status: "unreachable".to_string(),
            backend_timestamp: None,
            base_url: "http://localhost:8000".to_string(),
            ws_base_url: "ws://localhost:8000".to_string(),
            user_id: "user_1".to_string(),
            display_name: Some("Ada".to_string()),
            database_path: "/tmp/halcyon.db".to_string(),
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"online\":false"));
    }
}
