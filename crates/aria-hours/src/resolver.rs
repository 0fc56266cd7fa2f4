// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Resolves a schedule into its effective week and human-readable runs.
//!
//! Resolution merges the base week, looks up the active deviation, splices
//! the deviation's slots over matching weekdays, and merges again. The
//! cached entry point stores the finished record together with the window of
//! instants it holds for, which ends at the next moment a different deviation
//! could apply.

use std::sync::Arc;
use std::time::Duration;

use aria_config::{AriaConfig, GroupingMode};
use aria_core::{
    AriaError, Cache, OpeningHoursRecord, Schedule, ScheduleId, TimeSlot, TimeSlotStore,
};
use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::cache::{CachedRecord, schedule_cache_key};
use crate::merger::SlotMerger;
use crate::selector::select_active_deviation;

/// Runtime knobs for [`OpeningHoursResolver`], usually derived from config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    pub grouping: GroupingMode,
    pub cache_enabled: bool,
    /// Upper bound on a cached record's lifetime.
    pub cache_ttl: Duration,
    pub key_prefix: String,
}

impl ResolverSettings {
    pub fn from_config(config: &AriaConfig) -> Self {
        Self {
            grouping: config.hours.grouping,
            cache_enabled: config.cache.enabled,
            cache_ttl: Duration::from_secs(config.cache.ttl_secs),
            key_prefix: config.cache.key_prefix.clone(),
        }
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self::from_config(&AriaConfig::default())
    }
}

/// Replace every base slot whose weekday the deviation covers.
///
/// The result has exactly the base's weekdays, in the base's order.
/// Deviation slots for weekdays the base lacks are dropped.
pub fn splice_deviation(base: &[TimeSlot], overrides: &[TimeSlot]) -> Vec<TimeSlot> {
    base.iter()
        .map(|slot| {
            overrides
                .iter()
                .find(|o| o.weekday == slot.weekday)
                .unwrap_or(slot)
                .clone()
        })
        .collect()
}

/// A resolved record plus the instant after which it may be stale.
struct Resolution {
    record: OpeningHoursRecord,
    valid_until: Option<DateTime<Utc>>,
}

/// Builds [`OpeningHoursRecord`]s from a [`TimeSlotStore`], optionally
/// through a [`Cache`].
pub struct OpeningHoursResolver {
    store: Arc<dyn TimeSlotStore>,
    cache: Option<Arc<dyn Cache>>,
    merger: SlotMerger,
    settings: ResolverSettings,
}

impl OpeningHoursResolver {
    pub fn new(store: Arc<dyn TimeSlotStore>, settings: ResolverSettings) -> Self {
        Self {
            store,
            cache: None,
            merger: SlotMerger::new(settings.grouping),
            settings,
        }
    }

    /// Attach a cache. Ignored when `settings.cache_enabled` is false.
    pub fn with_cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn settings(&self) -> &ResolverSettings {
        &self.settings
    }

    /// Resolve `schedule` at `now` against the store, bypassing the cache.
    pub async fn resolve(
        &self,
        schedule: &Schedule,
        now: DateTime<Utc>,
    ) -> Result<OpeningHoursRecord, AriaError> {
        Ok(self.resolve_live(schedule, now).await?.record)
    }

    /// Opening hours detail for a schedule id, served from the cache when possible.
    ///
    /// Returns [`AriaError::NotFound`] when the schedule does not exist.
    pub async fn opening_hours_detail(
        &self,
        id: ScheduleId,
        now: DateTime<Utc>,
    ) -> Result<OpeningHoursRecord, AriaError> {
        let key = schedule_cache_key(&self.settings.key_prefix, id);
        if let Some(record) = self.read_cached(&key, now).await {
            return Ok(record);
        }

        let schedule = self
            .store
            .get_schedule(id)
            .await?
            .ok_or_else(|| AriaError::not_found("schedule", id))?;
        self.resolve_and_cache(&schedule, now, &key).await
    }

    /// Like [`Self::opening_hours_detail`] for a schedule the caller already
    /// holds, e.g. one carrying prefetched deviations.
    pub async fn opening_hours_for(
        &self,
        schedule: &Schedule,
        now: DateTime<Utc>,
    ) -> Result<OpeningHoursRecord, AriaError> {
        let key = schedule_cache_key(&self.settings.key_prefix, schedule.id);
        if let Some(record) = self.read_cached(&key, now).await {
            return Ok(record);
        }
        self.resolve_and_cache(schedule, now, &key).await
    }

    async fn resolve_live(
        &self,
        schedule: &Schedule,
        now: DateTime<Utc>,
    ) -> Result<Resolution, AriaError> {
        let base = self.store.get_week(schedule.id).await?;

        let Some(deviation) = select_active_deviation(self.store.as_ref(), schedule, now).await?
        else {
            let human_readable_time_slots = self.merger.merge(&base);
            return Ok(Resolution {
                record: OpeningHoursRecord {
                    id: schedule.id.0,
                    schedule_id: schedule.id,
                    deviation_id: None,
                    time_slots: base,
                    human_readable_time_slots,
                },
                valid_until: None,
            });
        };

        let overrides = self.store.get_deviation_slots(deviation.id).await?;
        let time_slots = splice_deviation(&base, &overrides);
        let human_readable_time_slots = self.merger.merge(&time_slots);
        debug!(
            schedule_id = %schedule.id,
            deviation_id = %deviation.id,
            overridden = overrides.len(),
            "deviation applied"
        );

        Ok(Resolution {
            record: OpeningHoursRecord {
                id: schedule.id.0,
                schedule_id: schedule.id,
                deviation_id: Some(deviation.id),
                time_slots,
                human_readable_time_slots,
            },
            valid_until: Some(deviation.active_until),
        })
    }

    fn active_cache(&self) -> Option<&dyn Cache> {
        if self.settings.cache_enabled {
            self.cache.as_deref()
        } else {
            None
        }
    }

    /// Cached record for `key` if it was resolved for a window containing
    /// `now`. Read and decode failures count as misses.
    async fn read_cached(&self, key: &str, now: DateTime<Utc>) -> Option<OpeningHoursRecord> {
        let cache = self.active_cache()?;
        match cache.get(key).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<CachedRecord>(&bytes) {
                Ok(cached) if cached.covers(now) => {
                    debug!(key, "opening hours cache hit");
                    Some(cached.record)
                }
                Ok(cached) => {
                    debug!(
                        key,
                        resolved_at = %cached.resolved_at,
                        valid_until = %cached.valid_until,
                        "cached opening hours do not cover requested instant"
                    );
                    None
                }
                Err(e) => {
                    warn!(key, error = %e, "discarding undecodable cache entry");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                warn!(key, error = %e, "cache read failed, resolving live");
                None
            }
        }
    }

    async fn resolve_and_cache(
        &self,
        schedule: &Schedule,
        now: DateTime<Utc>,
        key: &str,
    ) -> Result<OpeningHoursRecord, AriaError> {
        let resolution = self.resolve_live(schedule, now).await?;

        if let Some(cache) = self.active_cache()
            && let Some(ttl) = self.cache_ttl(schedule, &resolution, now).await
            && let Some(valid_until) = chrono::Duration::from_std(ttl)
                .ok()
                .and_then(|ttl| now.checked_add_signed(ttl))
        {
            let cached = CachedRecord {
                record: resolution.record,
                resolved_at: now,
                valid_until,
            };
            match serde_json::to_vec(&cached) {
                Ok(bytes) => {
                    if let Err(e) = cache.set(key, bytes, ttl).await {
                        warn!(key, error = %e, "cache write failed");
                    }
                }
                Err(e) => warn!(key, error = %e, "failed to encode opening hours record"),
            }
            return Ok(cached.record);
        }

        Ok(resolution.record)
    }

    /// Lifetime for a fresh record: the configured TTL, shortened to the end
    /// of the applied deviation or the start of the next one. `None` skips caching.
    async fn cache_ttl(
        &self,
        schedule: &Schedule,
        resolution: &Resolution,
        now: DateTime<Utc>,
    ) -> Option<Duration> {
        let next_start = match self.store.get_next_deviation_start(schedule.id, now).await {
            Ok(start) => start,
            Err(e) => {
                warn!(schedule_id = %schedule.id, error = %e, "could not bound cache lifetime, skipping cache");
                return None;
            }
        };

        let boundary = match (resolution.valid_until, next_start) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };

        let ttl = match boundary {
            Some(at) => (at - now).to_std().ok()?.min(self.settings.cache_ttl),
            None => self.settings.cache_ttl,
        };
        (!ttl.is_zero()).then_some(ttl)
    }
}

#[cfg(test)]
mod tests {
    use aria_core::{DeviationId, Weekday};
    use aria_test_utils::{MockStore, fixtures};
    use chrono::{NaiveTime, TimeZone};
    use tracing_test::traced_test;

    use super::*;

    fn t(h: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, 0, 0).unwrap()
    }

    #[test]
    fn splice_keeps_base_weekdays_and_order() {
        use Weekday::*;
        let base = vec![
            TimeSlot::open(Monday, t(9), t(17)),
            TimeSlot::open(Tuesday, t(9), t(17)),
        ];
        let overrides = vec![
            TimeSlot::closed(Sunday),
            TimeSlot::closed(Tuesday),
        ];
        let spliced = splice_deviation(&base, &overrides);
        assert_eq!(
            spliced,
            vec![TimeSlot::open(Monday, t(9), t(17)), TimeSlot::closed(Tuesday)]
        );
    }

    #[test]
    fn splice_without_overrides_is_identity() {
        let base = vec![TimeSlot::open(Weekday::Friday, t(9), t(16))];
        assert_eq!(splice_deviation(&base, &[]), base);
    }

    #[tokio::test]
    #[traced_test]
    async fn overridden_base_slot_is_not_merged() {
        let now = Utc.with_ymd_and_hms(2026, 12, 23, 12, 0, 0).unwrap();
        let mut week = fixtures::standard_week();
        let saturday = week
            .iter_mut()
            .find(|slot| slot.weekday == Weekday::Saturday)
            .unwrap();
        saturday.closing_time = None;

        let store = Arc::new(MockStore::new());
        store.insert_schedule(Schedule::new(ScheduleId(1), "shop"), week);
        store.insert_deviation(
            fixtures::deviation(DeviationId(4), ScheduleId(1), now - chrono::Duration::hours(1), 1),
            vec![TimeSlot::closed(Weekday::Saturday)],
        );

        let record = OpeningHoursResolver::new(store, ResolverSettings::default())
            .resolve(&Schedule::new(ScheduleId(1), "shop"), now)
            .await
            .unwrap();
        assert_eq!(record.deviation_id, Some(DeviationId(4)));
        assert!(!logs_contain("missing its opening or closing time"));
    }

    #[test]
    fn settings_follow_config() {
        let mut config = AriaConfig::default();
        config.cache.ttl_secs = 30;
        config.cache.key_prefix = "shop".into();
        config.hours.grouping = GroupingMode::Contiguous;

        let settings = ResolverSettings::from_config(&config);
        assert_eq!(settings.cache_ttl, Duration::from_secs(30));
        assert_eq!(settings.key_prefix, "shop");
        assert_eq!(settings.grouping, GroupingMode::Contiguous);
        assert!(settings.cache_enabled);
    }
}
