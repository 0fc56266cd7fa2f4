// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Schedule CRUD operations.

use aria_core::{AriaError, Schedule, ScheduleId};
use rusqlite::{OptionalExtension, params};

use crate::database::{Database, map_tr_err};

/// Insert a schedule and return its id.
pub async fn insert_schedule(db: &Database, name: &str) -> Result<ScheduleId, AriaError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            conn.execute("INSERT INTO schedules (name) VALUES (?1)", params![name])?;
            Ok(ScheduleId(conn.last_insert_rowid()))
        })
        .await
        .map_err(map_tr_err)
}

/// Rename a schedule. Returns `false` when no such schedule exists.
pub async fn rename_schedule(db: &Database, id: ScheduleId, name: &str) -> Result<bool, AriaError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            let changed = conn.execute(
                "UPDATE schedules SET name = ?1 WHERE id = ?2",
                params![name, id.0],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Get a schedule by id.
pub async fn get_schedule(db: &Database, id: ScheduleId) -> Result<Option<Schedule>, AriaError> {
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            conn.query_row(
                "SELECT id, name FROM schedules WHERE id = ?1",
                params![id.0],
                |row| Ok(Schedule::new(ScheduleId(row.get(0)?), row.get::<_, String>(1)?)),
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

pub async fn schedule_exists(db: &Database, id: ScheduleId) -> Result<bool, AriaError> {
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM schedules WHERE id = ?1)",
                params![id.0],
                |row| row.get(0),
            )
        })
        .await
        .map_err(map_tr_err)
}

/// All schedules, ordered by id.
pub async fn list_schedules(db: &Database) -> Result<Vec<Schedule>, AriaError> {
    db.connection()
        .call(|conn| -> Result<_, rusqlite::Error> {
            let mut stmt = conn.prepare("SELECT id, name FROM schedules ORDER BY id")?;
            let rows = stmt.query_map([], |row| {
                Ok(Schedule::new(ScheduleId(row.get(0)?), row.get::<_, String>(1)?))
            })?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}
