// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the resolver, the store, and the cache.

use std::fmt;

use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Identifier of a weekly schedule ("opening hours").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScheduleId(pub i64);

/// Identifier of a deviation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeviationId(pub i64);

/// Identifier of a deviation template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemplateId(pub i64);

/// Identifier of a site message owned by the site message subsystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SiteMessageId(pub i64);

macro_rules! display_inner {
    ($($ty:ty),*) => {
        $(impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        })*
    };
}

display_inner!(ScheduleId, DeviationId, TemplateId, SiteMessageId);

/// Calendar weekday, ordered Monday first.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    Serialize,
    Deserialize,
)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in canonical order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// Zero-based position, Monday = 0.
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Weekday::index`].
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(usize::from(index)).copied()
    }

    /// The following weekday within the same week. Sunday has none.
    pub fn next_in_week(self) -> Option<Self> {
        Self::from_index(self.index() + 1)
    }
}

impl From<chrono::Weekday> for Weekday {
    fn from(day: chrono::Weekday) -> Self {
        // num_days_from_monday is always 0..=6.
        Self::ALL[day.num_days_from_monday() as usize]
    }
}

/// One weekday's opening state for a schedule or a deviation.
///
/// Closed slots carry no times and open slots carry both. The store enforces
/// this on write; readers must tolerate violations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub weekday: Weekday,
    pub opening_time: Option<NaiveTime>,
    pub closing_time: Option<NaiveTime>,
    pub is_closed: bool,
}

impl TimeSlot {
    /// An open slot between `opening` and `closing`.
    pub fn open(weekday: Weekday, opening: NaiveTime, closing: NaiveTime) -> Self {
        Self {
            weekday,
            opening_time: Some(opening),
            closing_time: Some(closing),
            is_closed: false,
        }
    }

    /// A closed slot.
    pub fn closed(weekday: Weekday) -> Self {
        Self {
            weekday,
            opening_time: None,
            closing_time: None,
            is_closed: true,
        }
    }

    /// Whether the closed flag and the time fields agree.
    pub fn is_consistent(&self) -> bool {
        match (self.is_closed, self.opening_time, self.closing_time) {
            (true, None, None) => true,
            (false, Some(_), Some(_)) => true,
            _ => false,
        }
    }
}

/// Weekly base configuration for one site.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub id: ScheduleId,
    pub name: String,
    /// Deviations the caller already filtered to "active". When present the
    /// resolver uses its first element and skips the store lookup.
    pub prefetched_active_deviations: Option<Vec<Deviation>>,
}

impl Schedule {
    pub fn new(id: ScheduleId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            prefetched_active_deviations: None,
        }
    }

    /// Attach an already-filtered list of active deviations.
    pub fn with_prefetched_deviations(mut self, deviations: Vec<Deviation>) -> Self {
        self.prefetched_active_deviations = Some(deviations);
        self
    }
}

/// Reusable description of a deviation, optionally linked to a site message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviationTemplate {
    pub id: TemplateId,
    pub name: String,
    pub site_message_id: Option<SiteMessageId>,
}

/// A time-bounded override of a schedule, active on `[active_from, active_until)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deviation {
    pub id: DeviationId,
    pub schedule_id: ScheduleId,
    pub template_id: Option<TemplateId>,
    /// Site message linked through the template, resolved at read time.
    pub site_message_id: Option<SiteMessageId>,
    pub active_from: DateTime<Utc>,
    pub active_until: DateTime<Utc>,
}

impl Deviation {
    /// Half-open interval check.
    pub fn is_active_at(&self, now: DateTime<Utc>) -> bool {
        self.active_from <= now && now < self.active_until
    }
}

/// A rendered run of weekdays sharing the same display characteristics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HumanReadableRun {
    pub days: String,
    pub time_slot: Option<String>,
    pub is_closed: bool,
}

/// Fully resolved opening hours for one schedule.
///
/// Built wholesale on every resolution (or decoded from a cache blob).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpeningHoursRecord {
    /// Wire identifier, equal to the schedule's numeric id.
    pub id: i64,
    pub schedule_id: ScheduleId,
    /// The deviation spliced into `time_slots`, if any.
    pub deviation_id: Option<DeviationId>,
    pub time_slots: Vec<TimeSlot>,
    pub human_readable_time_slots: Vec<HumanReadableRun>,
}

/// JSON shape served to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningHoursResponse {
    pub id: i64,
    pub human_readable_time_slots: Vec<HumanReadableRunResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HumanReadableRunResponse {
    pub days: String,
    pub time_slot: Option<String>,
    pub is_closed: bool,
}

impl From<&OpeningHoursRecord> for OpeningHoursResponse {
    fn from(record: &OpeningHoursRecord) -> Self {
        Self {
            id: record.id,
            human_readable_time_slots: record
                .human_readable_time_slots
                .iter()
                .map(|run| HumanReadableRunResponse {
                    days: run.days.clone(),
                    time_slot: run.time_slot.clone(),
                    is_closed: run.is_closed,
                })
                .collect(),
        }
    }
}
