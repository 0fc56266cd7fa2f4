// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text encodings for timestamp, time and weekday columns.

use aria_core::{TimeSlot, Weekday};
use chrono::{DateTime, NaiveDateTime, NaiveTime, Utc};
use rusqlite::Row;
use rusqlite::types::Type;

/// Fixed-width UTC timestamps, ordered lexicographically for years 0000-9999.
/// Writes outside that range are rejected before they reach SQL.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";
/// Whole seconds; sub-second times are rejected on write.
const TIME_FORMAT: &str = "%H:%M:%S";

pub(crate) fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub(crate) fn parse_timestamp(column: usize, raw: &str) -> rusqlite::Result<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

pub(crate) fn format_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

fn parse_time(column: usize, raw: &str) -> rusqlite::Result<NaiveTime> {
    NaiveTime::parse_from_str(raw, TIME_FORMAT)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}

/// Reads `weekday, opening_time, closing_time, is_closed` from the first
/// four columns.
pub(crate) fn slot_from_row(row: &Row<'_>) -> rusqlite::Result<TimeSlot> {
    let index: u8 = row.get(0)?;
    let weekday = Weekday::from_index(index).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Integer,
            format!("weekday out of range: {index}").into(),
        )
    })?;
    let opening: Option<String> = row.get(1)?;
    let closing: Option<String> = row.get(2)?;

    Ok(TimeSlot {
        weekday,
        opening_time: opening.map(|raw| parse_time(1, &raw)).transpose()?,
        closing_time: closing.map(|raw| parse_time(2, &raw)).transpose()?,
        is_closed: row.get(3)?,
    })
}
