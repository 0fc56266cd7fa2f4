// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Cache keys and an in-process TTL cache.

use std::time::{Duration, Instant};

use aria_core::{AriaError, Cache, OpeningHoursRecord, ScheduleId, SiteMessageId};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Key under which a schedule's resolved record is cached.
pub fn schedule_cache_key(prefix: &str, id: ScheduleId) -> String {
    format!("{prefix}:opening_hours:{id}")
}

/// Key owned by the site message subsystem for one message.
pub fn site_message_cache_key(prefix: &str, id: SiteMessageId) -> String {
    format!("{prefix}:site_message:{id}")
}

/// Cached form of a resolved record: the record plus the instants it holds for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CachedRecord {
    pub record: OpeningHoursRecord,
    pub resolved_at: DateTime<Utc>,
    /// Exclusive.
    pub valid_until: DateTime<Utc>,
}

impl CachedRecord {
    /// Whether resolving at `now` is guaranteed to give `self.record`.
    pub fn covers(&self, now: DateTime<Utc>) -> bool {
        self.resolved_at <= now && now < self.valid_until
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    value: Vec<u8>,
    /// `None` when `now + ttl` overflows; such entries never expire.
    expires_at: Option<Instant>,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at.is_none_or(|at| now < at)
    }
}

/// Concurrent in-memory cache with per-entry expiry.
///
/// Expired entries read as misses and are evicted on access; call
/// [`MemoryCache::purge_expired`] to sweep the rest.
#[derive(Debug, Default)]
pub struct MemoryCache {
    entries: DashMap<String, CacheEntry>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every expired entry. Returns how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.is_live(now));
        before.saturating_sub(self.entries.len())
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, AriaError> {
        let now = Instant::now();
        if let Some(entry) = self.entries.get(key)
            && entry.is_live(now)
        {
            return Ok(Some(entry.value.clone()));
        }
        // The shard guard above is released before removing.
        self.entries.remove_if(key, |_, entry| !entry.is_live(now));
        Ok(None)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), AriaError> {
        let entry = CacheEntry {
            value,
            expires_at: Instant::now().checked_add(ttl),
        };
        self.entries.insert(key.to_string(), entry);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AriaError> {
        self.entries.remove(key);
        Ok(())
    }
}
