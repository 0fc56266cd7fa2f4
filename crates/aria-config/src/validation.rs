// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde attributes cannot express.

use crate::diagnostic::ConfigError;
use crate::model::AriaConfig;

/// Validate a deserialized configuration.
///
/// Collects every failure instead of stopping at the first one.
pub fn validate_config(config: &AriaConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if !is_known_level(&config.log.level) {
        errors.push(ConfigError::Validation {
            message: format!(
                "log.level `{}` must be one of trace, debug, info, warn, error",
                config.log.level
            ),
        });
    }

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if config.cache.enabled && config.cache.ttl_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "cache.ttl_secs must be greater than 0 when the cache is enabled".to_string(),
        });
    }

    let prefix = &config.cache.key_prefix;
    if prefix.is_empty() || prefix.chars().any(|c| c.is_whitespace() || c == ':') {
        errors.push(ConfigError::Validation {
            message: format!(
                "cache.key_prefix `{prefix}` must be non-empty and contain no whitespace or `:`"
            ),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn is_known_level(level: &str) -> bool {
    level.parse::<tracing::Level>().is_ok()
}
