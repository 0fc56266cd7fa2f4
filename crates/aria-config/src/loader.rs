// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./aria.toml` > `~/.config/aria/aria.toml` > `/etc/aria/aria.toml`
//! with environment variable overrides via `ARIA_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::AriaConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/aria/aria.toml` (system-wide)
/// 3. `~/.config/aria/aria.toml` (user XDG config)
/// 4. `./aria.toml` (local directory)
/// 5. `ARIA_*` environment variables
pub fn load_config() -> Result<AriaConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
pub fn load_config_from_str(toml_content: &str) -> Result<AriaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AriaConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<AriaConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(AriaConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(AriaConfig::default()))
        .merge(Toml::file("/etc/aria/aria.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("aria/aria.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("aria.toml"))
        .merge(env_provider())
}

/// Environment variable provider with explicit section-to-dot mapping.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `ARIA_CACHE_TTL_SECS` must map to `cache.ttl_secs`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("ARIA_").map(|key| {
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("log_", "log.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("cache_", "cache.", 1)
            .replacen("hours_", "hours.", 1);
        mapped.into()
    })
}
