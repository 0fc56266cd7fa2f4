// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end resolver behaviour against in-memory collaborators.

use std::sync::Arc;
use std::time::Duration;

use aria_core::{
    AriaError, DeviationId, HumanReadableRun, OpeningHoursResponse, Schedule, ScheduleId,
    TimeSlot, Weekday, WriteObserver,
};
use aria_hours::{
    CacheInvalidator, CachedRecord, MemoryCache, OpeningHoursResolver, ResolverSettings,
};
use aria_test_utils::{FailingCache, MockStore, RecordingCache, fixtures};
use chrono::{DateTime, TimeZone, Utc};

const SHOP: ScheduleId = ScheduleId(1);
const KEY: &str = "aria:opening_hours:1";

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 12, 23, 12, 0, 0).unwrap()
}

fn run(days: &str, time_slot: Option<&str>, is_closed: bool) -> HumanReadableRun {
    HumanReadableRun {
        days: days.to_string(),
        time_slot: time_slot.map(str::to_string),
        is_closed,
    }
}

fn store_with_standard_week() -> Arc<MockStore> {
    let store = Arc::new(MockStore::new());
    store.insert_schedule(Schedule::new(SHOP, "shop"), fixtures::standard_week());
    store
}

fn resolver(store: Arc<MockStore>) -> OpeningHoursResolver {
    OpeningHoursResolver::new(store, ResolverSettings::default())
}

/// Wednesday closed, active for a day around `now()`.
fn add_wednesday_closure(store: &MockStore) -> aria_core::Deviation {
    let deviation = fixtures::deviation(
        DeviationId(10),
        SHOP,
        now() - chrono::Duration::hours(12),
        1,
    );
    store.insert_deviation(deviation.clone(), vec![TimeSlot::closed(Weekday::Wednesday)]);
    deviation
}

#[tokio::test]
async fn standard_week_without_deviation() {
    let store = store_with_standard_week();
    let record = resolver(store.clone())
        .opening_hours_detail(SHOP, now())
        .await
        .unwrap();

    assert_eq!(record.id, 1);
    assert_eq!(record.schedule_id, SHOP);
    assert_eq!(record.deviation_id, None);
    assert_eq!(record.time_slots, fixtures::standard_week());
    assert_eq!(
        record.human_readable_time_slots,
        vec![
            run("Monday - Thursday", Some("09:00 - 17:00"), false),
            run("Friday", Some("09:00 - 16:00"), false),
            run("Saturday", Some("10:00 - 15:00"), false),
            run("Sunday", None, true),
        ]
    );
    assert_eq!(store.calls().deviation_slots, 0);
}

#[tokio::test]
async fn wednesday_closure_splits_weekday_run() {
    let store = store_with_standard_week();
    let deviation = add_wednesday_closure(&store);

    let record = resolver(store.clone())
        .opening_hours_detail(SHOP, now())
        .await
        .unwrap();

    assert_eq!(record.deviation_id, Some(deviation.id));
    assert_eq!(record.time_slots.len(), 7);
    assert_eq!(record.time_slots[2], TimeSlot::closed(Weekday::Wednesday));
    assert_eq!(record.time_slots[0], fixtures::standard_week()[0]);

    // Mon, Tue, Thu stay together; Wednesday joins Sunday's closed group.
    assert_eq!(
        record.human_readable_time_slots,
        vec![
            run("Monday - Thursday", Some("09:00 - 17:00"), false),
            run("Wednesday - Sunday", None, true),
            run("Friday", Some("09:00 - 16:00"), false),
            run("Saturday", Some("10:00 - 15:00"), false),
        ]
    );
    assert_eq!(store.calls().deviation_slots, 1);
}

#[tokio::test]
async fn expired_deviation_is_ignored() {
    let store = store_with_standard_week();
    let deviation = add_wednesday_closure(&store);

    let record = resolver(store)
        .resolve(&Schedule::new(SHOP, "shop"), deviation.active_until)
        .await
        .unwrap();
    assert_eq!(record.deviation_id, None);
    assert_eq!(record.time_slots, fixtures::standard_week());
}

#[tokio::test]
async fn resolving_twice_is_byte_identical() {
    let store = store_with_standard_week();
    let resolver = resolver(store);
    let schedule = Schedule::new(SHOP, "shop");

    let first = resolver.resolve(&schedule, now()).await.unwrap();
    let second = resolver.resolve(&schedule, now()).await.unwrap();
    assert_eq!(
        serde_json::to_vec(&first).unwrap(),
        serde_json::to_vec(&second).unwrap()
    );
}

#[tokio::test]
async fn empty_schedule_has_no_runs() {
    let store = Arc::new(MockStore::new());
    store.insert_schedule(Schedule::new(SHOP, "new shop"), vec![]);

    let record = resolver(store).opening_hours_detail(SHOP, now()).await.unwrap();
    assert!(record.time_slots.is_empty());
    assert!(record.human_readable_time_slots.is_empty());
}

#[tokio::test]
async fn identical_week_is_a_single_run() {
    let store = Arc::new(MockStore::new());
    store.insert_schedule(
        Schedule::new(SHOP, "shop"),
        fixtures::uniform_week(fixtures::hm(7, 0), fixtures::hm(23, 0)),
    );

    let record = resolver(store).opening_hours_detail(SHOP, now()).await.unwrap();
    assert_eq!(
        record.human_readable_time_slots,
        vec![run("Monday - Sunday", Some("07:00 - 23:00"), false)]
    );
}

#[tokio::test]
async fn unknown_schedule_is_not_found() {
    let store = Arc::new(MockStore::new());
    let err = resolver(store)
        .opening_hours_detail(ScheduleId(99), now())
        .await
        .unwrap_err();
    assert!(matches!(err, AriaError::NotFound { entity: "schedule", .. }));
}

#[tokio::test]
async fn store_failure_propagates() {
    let store = store_with_standard_week();
    store.set_unavailable(true);
    let err = resolver(store)
        .opening_hours_detail(SHOP, now())
        .await
        .unwrap_err();
    assert!(matches!(err, AriaError::StoreUnavailable { .. }));
}

#[tokio::test]
async fn prefetched_deviation_is_used_without_lookup() {
    let store = store_with_standard_week();
    let deviation = add_wednesday_closure(&store);
    let schedule = Schedule::new(SHOP, "shop").with_prefetched_deviations(vec![deviation.clone()]);

    let record = resolver(store.clone())
        .opening_hours_for(&schedule, now())
        .await
        .unwrap();
    assert_eq!(record.deviation_id, Some(deviation.id));
    assert_eq!(store.calls().active_deviation, 0);
}

#[tokio::test]
async fn cache_hit_matches_live_resolution() {
    let store = store_with_standard_week();
    add_wednesday_closure(&store);
    let cache = Arc::new(MemoryCache::new());
    let resolver = resolver(store.clone()).with_cache(cache.clone());

    let live = resolver.opening_hours_detail(SHOP, now()).await.unwrap();
    store.reset_calls();
    let cached = resolver.opening_hours_detail(SHOP, now()).await.unwrap();

    assert_eq!(cached, live);
    assert_eq!(store.calls().week, 0);
    assert_eq!(store.calls().schedule, 0);
}

#[tokio::test]
async fn failing_cache_falls_back_to_live_resolution() {
    let store = store_with_standard_week();
    let expected = resolver(store.clone())
        .opening_hours_detail(SHOP, now())
        .await
        .unwrap();

    let record = resolver(store)
        .with_cache(Arc::new(FailingCache::new()))
        .opening_hours_detail(SHOP, now())
        .await
        .unwrap();
    assert_eq!(record, expected);
}

#[tokio::test]
async fn corrupt_cache_entry_is_replaced() {
    let store = store_with_standard_week();
    let cache = Arc::new(RecordingCache::new());
    cache.insert_raw(KEY, b"not json".to_vec());

    let record = resolver(store.clone())
        .with_cache(cache.clone())
        .opening_hours_detail(SHOP, now())
        .await
        .unwrap();

    assert_eq!(store.calls().week, 1);
    let stored: CachedRecord = serde_json::from_slice(&cache.raw(KEY).unwrap()).unwrap();
    assert_eq!(stored.record, record);
    assert_eq!(stored.resolved_at, now());
}

#[tokio::test]
async fn cached_record_is_not_served_after_its_deviation_ends() {
    let store = store_with_standard_week();
    let deviation = add_wednesday_closure(&store);
    let resolver = resolver(store.clone()).with_cache(Arc::new(MemoryCache::new()));

    let first = resolver.opening_hours_detail(SHOP, now()).await.unwrap();
    assert_eq!(first.deviation_id, Some(deviation.id));

    let later = deviation.active_until + chrono::Duration::days(7);
    let cached = resolver.opening_hours_detail(SHOP, later).await.unwrap();
    let live = resolver
        .resolve(&Schedule::new(SHOP, "shop"), later)
        .await
        .unwrap();

    assert_eq!(cached, live);
    assert_eq!(cached.deviation_id, None);
    assert_eq!(
        cached.human_readable_time_slots[0],
        run("Monday - Thursday", Some("09:00 - 17:00"), false)
    );
}

#[tokio::test]
async fn cached_record_is_not_served_before_it_was_resolved() {
    let store = store_with_standard_week();
    let deviation = add_wednesday_closure(&store);
    let resolver = resolver(store.clone()).with_cache(Arc::new(MemoryCache::new()));

    resolver.opening_hours_detail(SHOP, now()).await.unwrap();
    store.reset_calls();

    let earlier = deviation.active_from - chrono::Duration::days(1);
    let record = resolver.opening_hours_detail(SHOP, earlier).await.unwrap();
    assert_eq!(record.deviation_id, None);
    assert_eq!(store.calls().week, 1);
}

#[tokio::test]
async fn ttl_is_capped_at_deviation_end() {
    let store = store_with_standard_week();
    let deviation = add_wednesday_closure(&store);
    let cache = Arc::new(RecordingCache::new());

    resolver(store)
        .with_cache(cache.clone())
        .opening_hours_detail(SHOP, now())
        .await
        .unwrap();

    let remaining = (deviation.active_until - now()).to_std().unwrap();
    assert_eq!(cache.ttl_of(KEY), Some(remaining));
}

#[tokio::test]
async fn ttl_is_capped_at_next_deviation_start() {
    let store = store_with_standard_week();
    let upcoming = fixtures::deviation(DeviationId(20), SHOP, now() + chrono::Duration::hours(2), 1);
    store.insert_deviation(upcoming, vec![TimeSlot::closed(Weekday::Thursday)]);
    let cache = Arc::new(RecordingCache::new());

    let record = resolver(store)
        .with_cache(cache.clone())
        .opening_hours_detail(SHOP, now())
        .await
        .unwrap();

    assert_eq!(record.deviation_id, None);
    assert_eq!(cache.ttl_of(KEY), Some(Duration::from_secs(2 * 3600)));
}

#[tokio::test]
async fn ttl_defaults_to_configured_bound() {
    let store = store_with_standard_week();
    let cache = Arc::new(RecordingCache::new());
    let settings = ResolverSettings {
        cache_ttl: Duration::from_secs(90),
        ..ResolverSettings::default()
    };

    OpeningHoursResolver::new(store, settings)
        .with_cache(cache.clone())
        .opening_hours_detail(SHOP, now())
        .await
        .unwrap();
    assert_eq!(cache.ttl_of(KEY), Some(Duration::from_secs(90)));
}

#[tokio::test]
async fn disabled_cache_is_never_written() {
    let store = store_with_standard_week();
    let cache = Arc::new(RecordingCache::new());
    let settings = ResolverSettings {
        cache_enabled: false,
        ..ResolverSettings::default()
    };

    OpeningHoursResolver::new(store, settings)
        .with_cache(cache.clone())
        .opening_hours_detail(SHOP, now())
        .await
        .unwrap();
    assert_eq!(cache.set_count(), 0);
}

#[tokio::test]
async fn invalidation_forces_recomputation() {
    let store = store_with_standard_week();
    let cache = Arc::new(MemoryCache::new());
    let resolver = resolver(store.clone()).with_cache(cache.clone());
    let invalidator = CacheInvalidator::new(cache.clone(), "aria");

    let before = resolver.opening_hours_detail(SHOP, now()).await.unwrap();
    assert_eq!(before.human_readable_time_slots.len(), 4);

    store.set_week(SHOP, fixtures::uniform_week(fixtures::hm(9, 0), fixtures::hm(17, 0)));
    let stale = resolver.opening_hours_detail(SHOP, now()).await.unwrap();
    assert_eq!(stale, before);

    invalidator.schedule_changed(SHOP).await;
    let after = resolver.opening_hours_detail(SHOP, now()).await.unwrap();
    assert_eq!(
        after.human_readable_time_slots,
        vec![run("Monday - Sunday", Some("09:00 - 17:00"), false)]
    );
}

#[tokio::test]
async fn response_matches_wire_shape() {
    let store = store_with_standard_week();
    let record = resolver(store).opening_hours_detail(SHOP, now()).await.unwrap();

    let json = serde_json::to_value(OpeningHoursResponse::from(&record)).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "id": 1,
            "humanReadableTimeSlots": [
                {"days": "Monday - Thursday", "timeSlot": "09:00 - 17:00", "isClosed": false},
                {"days": "Friday", "timeSlot": "09:00 - 16:00", "isClosed": false},
                {"days": "Saturday", "timeSlot": "10:00 - 15:00", "isClosed": false},
                {"days": "Sunday", "timeSlot": null, "isClosed": true}
            ]
        })
    );
}
