// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Read-side persistence collaborator for schedules and deviations.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::AriaError;
use crate::types::{Deviation, DeviationId, Schedule, ScheduleId, TimeSlot};

/// Supplies raw weekly time slots and deviations to the resolver.
///
/// Implementations return read-only snapshots. Backend failures are reported
/// as [`AriaError::StoreUnavailable`] and are not retried by callers.
#[async_trait]
pub trait TimeSlotStore: Send + Sync {
    /// Looks up a schedule. `None` when no such schedule exists.
    async fn get_schedule(&self, id: ScheduleId) -> Result<Option<Schedule>, AriaError>;

    /// Base slots of a schedule, at most one per weekday, ordered Monday..Sunday.
    async fn get_week(&self, id: ScheduleId) -> Result<Vec<TimeSlot>, AriaError>;

    /// The deviation active at `now` (`active_from <= now < active_until`).
    ///
    /// Overlapping deviations resolve to the latest `active_from`, then the
    /// highest id.
    async fn get_active_deviation(
        &self,
        id: ScheduleId,
        now: DateTime<Utc>,
    ) -> Result<Option<Deviation>, AriaError>;

    /// Slots owned by a deviation, covering any subset of weekdays.
    async fn get_deviation_slots(&self, id: DeviationId) -> Result<Vec<TimeSlot>, AriaError>;

    /// Earliest `active_from` strictly after `now` among the schedule's deviations.
    async fn get_next_deviation_start(
        &self,
        id: ScheduleId,
        now: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, AriaError>;
}
