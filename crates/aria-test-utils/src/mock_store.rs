// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory `TimeSlotStore` for deterministic testing.
//!
//! `MockStore` mirrors the SQLite store's contract (unknown schedules are
//! `NotFound`, overlapping deviations prefer the latest start then the
//! highest id) and counts every call so tests can assert which lookups ran.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use aria_core::{
    AriaError, Deviation, DeviationId, Schedule, ScheduleId, TimeSlot, TimeSlotStore,
};

/// Number of calls made to each store operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub schedule: usize,
    pub week: usize,
    pub active_deviation: usize,
    pub deviation_slots: usize,
    pub next_start: usize,
}

#[derive(Default)]
struct State {
    schedules: HashMap<ScheduleId, (Schedule, Vec<TimeSlot>)>,
    deviations: Vec<(Deviation, Vec<TimeSlot>)>,
    calls: CallCounts,
    unavailable: bool,
}

/// A `TimeSlotStore` backed by plain collections.
#[derive(Default)]
pub struct MockStore {
    state: Mutex<State>,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        // A panicking test poisons the lock; the data is still usable.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Add or replace a schedule and its base week.
    pub fn insert_schedule(&self, schedule: Schedule, week: Vec<TimeSlot>) {
        self.state().schedules.insert(schedule.id, (schedule, week));
    }

    /// Replace the base week of an existing schedule.
    pub fn set_week(&self, id: ScheduleId, week: Vec<TimeSlot>) {
        if let Some(entry) = self.state().schedules.get_mut(&id) {
            entry.1 = week;
        }
    }

    /// Add a deviation with its slots.
    pub fn insert_deviation(&self, deviation: Deviation, slots: Vec<TimeSlot>) {
        self.state().deviations.push((deviation, slots));
    }

    /// Remove a deviation by id.
    pub fn remove_deviation(&self, id: DeviationId) {
        self.state().deviations.retain(|(d, _)| d.id != id);
    }

    /// Make every read fail with `StoreUnavailable`.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.state().unavailable = unavailable;
    }

    /// Snapshot of the call counters.
    pub fn calls(&self) -> CallCounts {
        self.state().calls
    }

    pub fn reset_calls(&self) {
        self.state().calls = CallCounts::default();
    }
}

fn unavailable() -> AriaError {
    AriaError::store(std::io::Error::other("mock store unavailable"))
}

impl State {
    fn check(&self, id: ScheduleId) -> Result<(), AriaError> {
        if self.unavailable {
            return Err(unavailable());
        }
        if !self.schedules.contains_key(&id) {
            return Err(AriaError::not_found("schedule", id));
        }
        Ok(())
    }

    fn deviations_of(&self, id: ScheduleId) -> impl Iterator<Item = &Deviation> {
        self.deviations
            .iter()
            .map(|(d, _)| d)
            .filter(move |d| d.schedule_id == id)
    }
}

#[async_trait]
impl TimeSlotStore for MockStore {
    async fn get_schedule(&self, id: ScheduleId) -> Result<Option<Schedule>, AriaError> {
        let mut state = self.state();
        state.calls.schedule += 1;
        if state.unavailable {
            return Err(unavailable());
        }
        Ok(state.schedules.get(&id).map(|(s, _)| s.clone()))
    }

    async fn get_week(&self, id: ScheduleId) -> Result<Vec<TimeSlot>, AriaError> {
        let mut state = self.state();
        state.calls.week += 1;
        state.check(id)?;
        let mut week = state.schedules[&id].1.clone();
        week.sort_by_key(|slot| slot.weekday);
        Ok(week)
    }

    async fn get_active_deviation(
        &self,
        id: ScheduleId,
        now: DateTime<Utc>,
    ) -> Result<Option<Deviation>, AriaError> {
        let mut state = self.state();
        state.calls.active_deviation += 1;
        state.check(id)?;
        Ok(state
            .deviations_of(id)
            .filter(|d| d.is_active_at(now))
            .max_by_key(|d| (d.active_from, d.id))
            .cloned())
    }

    async fn get_deviation_slots(&self, id: DeviationId) -> Result<Vec<TimeSlot>, AriaError> {
        let mut state = self.state();
        state.calls.deviation_slots += 1;
        if state.unavailable {
            return Err(unavailable());
        }
        state
            .deviations
            .iter()
            .find(|(d, _)| d.id == id)
            .map(|(_, slots)| slots.clone())
            .ok_or_else(|| AriaError::not_found("deviation", id))
    }

    async fn get_next_deviation_start(
        &self,
        id: ScheduleId,
        now: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, AriaError> {
        let mut state = self.state();
        state.calls.next_start += 1;
        state.check(id)?;
        Ok(state
            .deviations_of(id)
            .map(|d| d.active_from)
            .filter(|from| *from > now)
            .min())
    }
}
