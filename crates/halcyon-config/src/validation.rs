// SPDX-FileCopyrightText: 2026 Halcyon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as URL schemes, non-empty paths, and non-zero timeouts.

use crate::diagnostic::ConfigError;
use crate::model::HalcyonConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &HalcyonConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let base_url = config.server.base_url.trim();
    if base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.base_url must not be empty".to_string(),
        });
    } else if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
        errors.push(ConfigError::Validation {
            message: format!("server.base_url `{base_url}` must start with http:// or https://"),
        });
    }

    let ws_base_url = config.server.ws_base_url.trim();
    if ws_base_url.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.ws_base_url must not be empty".to_string(),
        });
    } else if !ws_base_url.starts_with("ws://") && !ws_base_url.starts_with("wss://") {
        errors.push(ConfigError::Validation {
            message: format!("server.ws_base_url `{ws_base_url}` must start with ws:// or wss://"),
        });
    }

    if config.server.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "server.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.server.health_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "server.health_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.chat.history_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "chat.history_limit must be at least 1".to_string(),
        });
    }

    if config.mood.history_days == 0 {
        errors.push(ConfigError::Validation {
            message: "mood.history_days must be at least 1".to_string(),
        });
    }

    if config.mood.transitions_limit == 0 {
        errors.push(ConfigError::Validation {
            message: "mood.transitions_limit must be at least 1".to_string(),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.log.level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.log.level
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = HalcyonConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn empty_base_url_fails_validation() {
        let mut config = HalcyonConfig::default();
        config.server.base_url = "".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("base_url"))));
    }

    #[test]
    fn wrong_scheme_fails_validation() {
        let mut config = HalcyonConfig::default();
        config.server.base_url = "ftp://example.com".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("http://"))));
    }

    #[test]
    fn http_scheme_on_ws_url_fails_validation() {
        let mut config = HalcyonConfig::default();
        config.server.ws_base_url = "http://localhost:8000".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("ws_base_url"))));
    }

    #[test]
    fn zero_timeout_fails_validation() {
        let mut config = HalcyonConfig::default();
        config.server.request_timeout_secs = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("request_timeout_secs"))));
    }

    #[test]
    fn bogus_log_level_fails_validation() {
        let mut config = HalcyonConfig::default();
        config.log.level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("log.level"))));
    }

    #[test]
    fn all_errors_collected_not_just_first() {
        let mut config = HalcyonConfig::default();
        config.server.base_url = "".to_string();
        config.chat.history_limit = 0;
        config.log.level = "loud".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn valid_custom_config_passes() {
        let mut config = HalcyonConfig::default();
        config.server.base_url = "https://halcyon.example.com".to_string();
        config.server.ws_base_url = "wss://halcyon.example.com".to_string();
        config.storage.database_path = "/tmp/test.db".to_string();
        config.mood.history_days = 7;
        assert!(validate_config(&config).is_ok());
    }
}
