// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `aria config`: print the effective configuration.

use aria_config::AriaConfig;
use aria_core::AriaError;

/// Serialize the merged configuration back to TOML.
pub fn render_config(config: &AriaConfig) -> Result<String, AriaError> {
    toml::to_string_pretty(config).map_err(|e| AriaError::Serialization {
        source: Box::new(e),
    })
}

pub fn run_config(config: &AriaConfig) -> Result<(), AriaError> {
    print!("{}", render_config(config)?);
    Ok(())
}
