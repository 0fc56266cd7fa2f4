// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic key-value cache collaborator.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::AriaError;

/// Byte-oriented cache with per-entry time to live.
///
/// The cache is an optimisation only: callers treat every error as a miss.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns the stored value, or `None` on a miss or after expiry.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AriaError>;

    /// Stores `value` under `key` for `ttl`.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), AriaError>;

    /// Removes `key`. Removing a missing key is not an error.
    async fn delete(&self, key: &str) -> Result<(), AriaError>;
}
