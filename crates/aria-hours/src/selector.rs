// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Picks the deviation active for a schedule at a given instant.

use aria_core::{AriaError, Deviation, Schedule, TimeSlotStore};
use chrono::{DateTime, Utc};
use tracing::debug;

/// Returns the active deviation for `schedule` at `now`, if any.
///
/// A prefetched list on the schedule is trusted as already filtered and its
/// first element is used without touching the store. Otherwise the store is
/// asked for the deviation covering `now`.
pub async fn select_active_deviation(
    store: &dyn TimeSlotStore,
    schedule: &Schedule,
    now: DateTime<Utc>,
) -> Result<Option<Deviation>, AriaError> {
    if let Some(prefetched) = &schedule.prefetched_active_deviations {
        debug!(
            schedule_id = %schedule.id,
            candidates = prefetched.len(),
            "using prefetched deviations"
        );
        return Ok(prefetched.first().cloned());
    }

    let deviation = store.get_active_deviation(schedule.id, now).await?;
    if let Some(deviation) = &deviation {
        debug!(
            schedule_id = %schedule.id,
            deviation_id = %deviation.id,
            "active deviation found"
        );
    }
    Ok(deviation)
}
