// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cache doubles for exercising the resolver's fallback paths.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use aria_core::{AriaError, Cache};

/// A cache that fails every operation.
#[derive(Debug, Default)]
pub struct FailingCache;

impl FailingCache {
    pub fn new() -> Self {
        Self
    }
}

fn cache_down() -> AriaError {
    AriaError::Cache {
        source: Box::new(std::io::Error::other("cache unreachable")),
    }
}

#[async_trait]
impl Cache for FailingCache {
    async fn get(&self, _key: &str) -> Result<Option<Vec<u8>>, AriaError> {
        Err(cache_down())
    }

    async fn set(&self, _key: &str, _value: Vec<u8>, _ttl: Duration) -> Result<(), AriaError> {
        Err(cache_down())
    }

    async fn delete(&self, _key: &str) -> Result<(), AriaError> {
        Err(cache_down())
    }
}

/// A non-expiring cache that remembers the TTL of every write.
#[derive(Debug, Default)]
pub struct RecordingCache {
    entries: Mutex<HashMap<String, (Vec<u8>, Duration)>>,
    sets: Mutex<usize>,
}

impl RecordingCache {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<String, (Vec<u8>, Duration)>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// TTL passed with the latest write of `key`, if it is still stored.
    pub fn ttl_of(&self, key: &str) -> Option<Duration> {
        self.entries().get(key).map(|(_, ttl)| *ttl)
    }

    /// Raw bytes stored under `key`.
    pub fn raw(&self, key: &str) -> Option<Vec<u8>> {
        self.entries().get(key).map(|(value, _)| value.clone())
    }

    /// Store bytes directly, bypassing callers (e.g. to plant a corrupt entry).
    pub fn insert_raw(&self, key: &str, value: Vec<u8>) {
        self.entries()
            .insert(key.to_string(), (value, Duration::MAX));
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries().contains_key(key)
    }

    /// Number of `set` calls so far.
    pub fn set_count(&self) -> usize {
        *self.sets.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl Cache for RecordingCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AriaError> {
        Ok(self.raw(key))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), AriaError> {
        self.entries().insert(key.to_string(), (value, ttl));
        *self.sets.lock().unwrap_or_else(|e| e.into_inner()) += 1;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AriaError> {
        self.entries().remove(key);
        Ok(())
    }
}
