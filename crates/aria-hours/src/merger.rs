// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collapses per-weekday time slots into human-readable runs.
//!
//! Grouping happens in two phases. Phase one walks the slots in the order
//! given and attaches each one to the first earlier group with identical
//! display characteristics (same opening and closing time, or both closed).
//! Phase two renders each group: a single day keeps its name, several days
//! become `"<first> - <last>"`.
//!
//! In the default [`GroupingMode::FirstSeen`] mode groups are formed by value
//! equality, not adjacency, so Monday and Friday at 09:00 - 17:00 with a
//! different Wednesday still form one group labelled `"Monday - Friday"`.

use aria_config::GroupingMode;
use aria_core::{HumanReadableRun, TimeSlot, Weekday};
use chrono::NaiveTime;
use tracing::warn;

/// What a run is keyed on. `is_closed` wins over any time values.
#[derive(Debug, Clone, PartialEq, Eq)]
enum RunKey {
    Closed,
    Open {
        opening: Option<NaiveTime>,
        closing: Option<NaiveTime>,
    },
}

impl RunKey {
    fn of(slot: &TimeSlot) -> Self {
        if slot.is_closed {
            if slot.opening_time.is_some() || slot.closing_time.is_some() {
                warn!(weekday = %slot.weekday, "closed slot carries times, ignoring them");
            }
            return RunKey::Closed;
        }
        if slot.opening_time.is_none() || slot.closing_time.is_none() {
            warn!(weekday = %slot.weekday, "open slot is missing its opening or closing time");
        }
        RunKey::Open {
            opening: slot.opening_time,
            closing: slot.closing_time,
        }
    }

    fn time_label(&self) -> Option<String> {
        match self {
            RunKey::Open {
                opening: Some(opening),
                closing: Some(closing),
            } => Some(format!(
                "{} - {}",
                opening.format("%H:%M"),
                closing.format("%H:%M")
            )),
            _ => None,
        }
    }

    fn is_closed(&self) -> bool {
        matches!(self, RunKey::Closed)
    }
}

/// Weekdays that share one [`RunKey`], in the order they were encountered.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Group {
    key: RunKey,
    days: Vec<Weekday>,
}

impl Group {
    fn start(key: RunKey, day: Weekday) -> Self {
        Self {
            key,
            days: vec![day],
        }
    }

    fn with_day(&self, day: Weekday) -> Self {
        let mut days = self.days.clone();
        days.push(day);
        Self {
            key: self.key.clone(),
            days,
        }
    }

    fn accepts(&self, key: &RunKey, day: Weekday) -> bool {
        self.key == *key && !self.days.contains(&day)
    }

    fn render(&self) -> HumanReadableRun {
        let days = match self.days.as_slice() {
            [only] => only.to_string(),
            [first, .., last] => format!("{first} - {last}"),
            [] => String::new(),
        };
        HumanReadableRun {
            days,
            time_slot: self.key.time_label(),
            is_closed: self.key.is_closed(),
        }
    }
}

/// Groups any earlier match, adjacent or not.
fn group_first_seen(slots: &[TimeSlot]) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    for slot in slots {
        let key = RunKey::of(slot);
        match groups.iter().position(|g| g.accepts(&key, slot.weekday)) {
            Some(i) => groups[i] = groups[i].with_day(slot.weekday),
            None => groups.push(Group::start(key, slot.weekday)),
        }
    }
    groups
}

/// Only extends the latest group, and only with the next weekday.
fn group_contiguous(slots: &[TimeSlot]) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    for slot in slots {
        let key = RunKey::of(slot);
        let extends_last = groups.last().is_some_and(|last| {
            last.key == key
                && last
                    .days
                    .last()
                    .and_then(|day| day.next_in_week())
                    .is_some_and(|next| next == slot.weekday)
        });
        if extends_last {
            let last = groups.len() - 1;
            groups[last] = groups[last].with_day(slot.weekday);
        } else {
            groups.push(Group::start(key, slot.weekday));
        }
    }
    groups
}

/// Renders time slots into [`HumanReadableRun`]s.
///
/// The input is expected in Monday..Sunday order and is never re-sorted.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlotMerger {
    mode: GroupingMode,
}

impl SlotMerger {
    pub fn new(mode: GroupingMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> GroupingMode {
        self.mode
    }

    /// Merge `slots` into runs, in first-seen order.
    pub fn merge(&self, slots: &[TimeSlot]) -> Vec<HumanReadableRun> {
        self.groups(slots).iter().map(Group::render).collect()
    }

    fn groups(&self, slots: &[TimeSlot]) -> Vec<Group> {
        match self.mode {
            GroupingMode::FirstSeen => group_first_seen(slots),
            GroupingMode::Contiguous => group_contiguous(slots),
        }
    }
}

/// Merge with the default first-seen grouping.
pub fn merge_time_slots(slots: &[TimeSlot]) -> Vec<HumanReadableRun> {
    SlotMerger::default().merge(slots)
}
