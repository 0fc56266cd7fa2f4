// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Writes through `SqliteStore` keep the resolver cache coherent.

use std::sync::Arc;

use aria_config::StorageConfig;
use aria_core::{HumanReadableRun, TimeSlot, Weekday};
use aria_hours::{CacheInvalidator, MemoryCache, OpeningHoursResolver, ResolverSettings};
use aria_storage::{NewDeviation, SqliteStore};
use aria_test_utils::fixtures;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tempfile::TempDir;

struct Harness {
    store: Arc<SqliteStore>,
    cache: Arc<MemoryCache>,
    resolver: OpeningHoursResolver,
    _dir: TempDir,
}

async fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let config = StorageConfig {
        database_path: dir.path().join("aria.db").to_str().unwrap().to_string(),
        wal_mode: true,
    };
    let cache = Arc::new(MemoryCache::new());
    let store = Arc::new(
        SqliteStore::open(&config)
            .await
            .unwrap()
            .with_observer(Arc::new(CacheInvalidator::new(cache.clone(), "aria"))),
    );
    let resolver =
        OpeningHoursResolver::new(store.clone(), ResolverSettings::default()).with_cache(cache.clone());
    Harness {
        store,
        cache,
        resolver,
        _dir: dir,
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 12, 23, 12, 0, 0).unwrap()
}

fn day_labels(runs: &[HumanReadableRun]) -> Vec<&str> {
    runs.iter().map(|run| run.days.as_str()).collect()
}

#[tokio::test]
async fn base_week_resolves_from_sqlite() {
    let h = harness().await;
    let schedule = h.store.create_schedule("shop").await.unwrap();
    for slot in fixtures::standard_week() {
        h.store.upsert_time_slot(schedule.id, &slot).await.unwrap();
    }

    let record = h.resolver.opening_hours_detail(schedule.id, now()).await.unwrap();
    assert_eq!(
        day_labels(&record.human_readable_time_slots),
        vec!["Monday - Thursday", "Friday", "Saturday", "Sunday"]
    );
    assert_eq!(h.cache.len(), 1);
}

#[tokio::test]
async fn time_slot_write_invalidates_cached_record() {
    let h = harness().await;
    let schedule = h.store.create_schedule("shop").await.unwrap();
    for slot in fixtures::standard_week() {
        h.store.upsert_time_slot(schedule.id, &slot).await.unwrap();
    }
    h.resolver.opening_hours_detail(schedule.id, now()).await.unwrap();
    assert_eq!(h.cache.len(), 1);

    h.store
        .upsert_time_slot(schedule.id, &TimeSlot::open(Weekday::Sunday, fixtures::hm(10, 0), fixtures::hm(15, 0)))
        .await
        .unwrap();
    assert!(h.cache.is_empty());

    let record = h.resolver.opening_hours_detail(schedule.id, now()).await.unwrap();
    assert_eq!(
        day_labels(&record.human_readable_time_slots),
        vec!["Monday - Thursday", "Friday", "Saturday - Sunday"]
    );
}

#[tokio::test]
async fn deviation_lifecycle_is_reflected_immediately() {
    let h = harness().await;
    let schedule = h.store.create_schedule("shop").await.unwrap();
    for slot in fixtures::standard_week() {
        h.store.upsert_time_slot(schedule.id, &slot).await.unwrap();
    }
    let before = h.resolver.opening_hours_detail(schedule.id, now()).await.unwrap();
    assert_eq!(before.deviation_id, None);

    let deviation = h
        .store
        .create_deviation(&NewDeviation {
            schedule_id: schedule.id,
            template_id: None,
            active_from: now() - Duration::hours(12),
            active_until: now() + Duration::hours(12),
        })
        .await
        .unwrap();
    h.store
        .upsert_deviation_slot(deviation.id, &TimeSlot::closed(Weekday::Wednesday))
        .await
        .unwrap();

    let during = h.resolver.opening_hours_detail(schedule.id, now()).await.unwrap();
    assert_eq!(during.deviation_id, Some(deviation.id));
    assert_eq!(
        day_labels(&during.human_readable_time_slots),
        vec!["Monday - Thursday", "Wednesday - Sunday", "Friday", "Saturday"]
    );

    h.store.delete_deviation(deviation.id).await.unwrap();
    let after = h.resolver.opening_hours_detail(schedule.id, now()).await.unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn unknown_schedule_is_not_found_and_not_cached() {
    let h = harness().await;
    let err = h
        .resolver
        .opening_hours_detail(aria_core::ScheduleId(123), now())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert!(h.cache.is_empty());
}
