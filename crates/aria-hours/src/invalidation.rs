// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Explicit cache invalidation, called by writers after they commit.
//!
//! Failures are logged and swallowed: a stale entry expires with its TTL,
//! while failing a committed write would be worse.

use std::sync::Arc;

use aria_core::{Cache, ScheduleId, SiteMessageId, WriteObserver};
use async_trait::async_trait;
use tracing::{debug, warn};

use crate::cache::{schedule_cache_key, site_message_cache_key};

/// Drop the cached record of one schedule.
pub async fn invalidate_schedule_cache(cache: &dyn Cache, key_prefix: &str, id: ScheduleId) {
    let key = schedule_cache_key(key_prefix, id);
    match cache.delete(&key).await {
        Ok(()) => debug!(schedule_id = %id, "opening hours cache invalidated"),
        Err(e) => warn!(schedule_id = %id, error = %e, "failed to invalidate opening hours cache"),
    }
}

/// Drop the cached site message linked to a deviation template.
pub async fn invalidate_site_message_cache(
    cache: &dyn Cache,
    key_prefix: &str,
    id: SiteMessageId,
) {
    let key = site_message_cache_key(key_prefix, id);
    match cache.delete(&key).await {
        Ok(()) => debug!(site_message_id = %id, "site message cache invalidated"),
        Err(e) => warn!(site_message_id = %id, error = %e, "failed to invalidate site message cache"),
    }
}

/// [`WriteObserver`] that keeps the resolver cache in step with the store.
#[derive(Clone)]
pub struct CacheInvalidator {
    cache: Arc<dyn Cache>,
    key_prefix: String,
}

impl CacheInvalidator {
    pub fn new(cache: Arc<dyn Cache>, key_prefix: impl Into<String>) -> Self {
        Self {
            cache,
            key_prefix: key_prefix.into(),
        }
    }
}

#[async_trait]
impl WriteObserver for CacheInvalidator {
    async fn schedule_changed(&self, id: ScheduleId) {
        invalidate_schedule_cache(self.cache.as_ref(), &self.key_prefix, id).await;
    }

    async fn site_message_changed(&self, id: SiteMessageId) {
        invalidate_site_message_cache(self.cache.as_ref(), &self.key_prefix, id).await;
    }
}
