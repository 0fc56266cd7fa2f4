// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reference data shared by tests.

use aria_core::{Deviation, DeviationId, ScheduleId, TimeSlot, Weekday};
use chrono::{DateTime, Duration, NaiveTime, Utc};

/// `HH:MM` on any day.
pub fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN)
}

/// Mon-Thu 09:00-17:00, Fri 09:00-16:00, Sat 10:00-15:00, Sun closed.
pub fn standard_week() -> Vec<TimeSlot> {
    use Weekday::*;
    vec![
        TimeSlot::open(Monday, hm(9, 0), hm(17, 0)),
        TimeSlot::open(Tuesday, hm(9, 0), hm(17, 0)),
        TimeSlot::open(Wednesday, hm(9, 0), hm(17, 0)),
        TimeSlot::open(Thursday, hm(9, 0), hm(17, 0)),
        TimeSlot::open(Friday, hm(9, 0), hm(16, 0)),
        TimeSlot::open(Saturday, hm(10, 0), hm(15, 0)),
        TimeSlot::closed(Sunday),
    ]
}

/// Seven identical open days.
pub fn uniform_week(opening: NaiveTime, closing: NaiveTime) -> Vec<TimeSlot> {
    Weekday::ALL
        .iter()
        .map(|day| TimeSlot::open(*day, opening, closing))
        .collect()
}

/// A deviation starting at `from` and lasting `days` days, with no template.
pub fn deviation(
    id: DeviationId,
    schedule_id: ScheduleId,
    from: DateTime<Utc>,
    days: i64,
) -> Deviation {
    Deviation {
        id,
        schedule_id,
        template_id: None,
        site_message_id: None,
        active_from: from,
        active_until: from + Duration::days(days),
    }
}
