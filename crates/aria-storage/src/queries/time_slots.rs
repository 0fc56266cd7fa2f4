// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-weekday time slots of schedules and deviations.
//!
//! Both tables hold at most one row per owner and weekday; writes upsert.

use aria_core::{AriaError, DeviationId, ScheduleId, TimeSlot};
use rusqlite::{Connection, params};

use crate::columns::{format_time, slot_from_row};
use crate::database::{Database, map_tr_err};

const UPSERT_SCHEDULE_SLOT: &str =
    "INSERT INTO time_slots (schedule_id, weekday, opening_time, closing_time, is_closed)
     VALUES (?1, ?2, ?3, ?4, ?5)
     ON CONFLICT (schedule_id, weekday) DO UPDATE SET
         opening_time = excluded.opening_time,
         closing_time = excluded.closing_time,
         is_closed = excluded.is_closed";

const UPSERT_DEVIATION_SLOT: &str =
    "INSERT INTO deviation_time_slots (deviation_id, weekday, opening_time, closing_time, is_closed)
     VALUES (?1, ?2, ?3, ?4, ?5)
     ON CONFLICT (deviation_id, weekday) DO UPDATE SET
         opening_time = excluded.opening_time,
         closing_time = excluded.closing_time,
         is_closed = excluded.is_closed";

const SELECT_SCHEDULE_SLOTS: &str =
    "SELECT weekday, opening_time, closing_time, is_closed
     FROM time_slots WHERE schedule_id = ?1 ORDER BY weekday";

const SELECT_DEVIATION_SLOTS: &str =
    "SELECT weekday, opening_time, closing_time, is_closed
     FROM deviation_time_slots WHERE deviation_id = ?1 ORDER BY weekday";

fn upsert(conn: &Connection, sql: &str, owner: i64, slot: &TimeSlot) -> rusqlite::Result<()> {
    conn.execute(
        sql,
        params![
            owner,
            slot.weekday.index(),
            slot.opening_time.map(format_time),
            slot.closing_time.map(format_time),
            slot.is_closed,
        ],
    )?;
    Ok(())
}

fn select(conn: &Connection, sql: &str, owner: i64) -> rusqlite::Result<Vec<TimeSlot>> {
    let mut stmt = conn.prepare(sql)?;
    let rows = stmt.query_map(params![owner], slot_from_row)?;
    rows.collect()
}

/// Insert or replace the slot for `slot.weekday` in a schedule's base week.
pub async fn upsert_time_slot(
    db: &Database,
    schedule_id: ScheduleId,
    slot: &TimeSlot,
) -> Result<(), AriaError> {
    let slot = slot.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            upsert(conn, UPSERT_SCHEDULE_SLOT, schedule_id.0, &slot)
        })
        .await
        .map_err(map_tr_err)
}

/// A schedule's base week, Monday first.
pub async fn week_for_schedule(
    db: &Database,
    schedule_id: ScheduleId,
) -> Result<Vec<TimeSlot>, AriaError> {
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            select(conn, SELECT_SCHEDULE_SLOTS, schedule_id.0)
        })
        .await
        .map_err(map_tr_err)
}

/// Insert or replace the slot for `slot.weekday` in a deviation.
pub async fn upsert_deviation_slot(
    db: &Database,
    deviation_id: DeviationId,
    slot: &TimeSlot,
) -> Result<(), AriaError> {
    let slot = slot.clone();
    db.connection()
        .call(move |conn| -> Result<(), rusqlite::Error> {
            upsert(conn, UPSERT_DEVIATION_SLOT, deviation_id.0, &slot)
        })
        .await
        .map_err(map_tr_err)
}

/// Slots owned by a deviation, Monday first.
pub async fn slots_for_deviation(
    db: &Database,
    deviation_id: DeviationId,
) -> Result<Vec<TimeSlot>, AriaError> {
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            select(conn, SELECT_DEVIATION_SLOTS, deviation_id.0)
        })
        .await
        .map_err(map_tr_err)
}
