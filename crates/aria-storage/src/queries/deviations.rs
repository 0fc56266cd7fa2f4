// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deviation CRUD operations and window lookups.
//!
//! Reads join the template so every [`Deviation`] carries the site message
//! its template links to.

use aria_core::{AriaError, Deviation, DeviationId, ScheduleId, SiteMessageId, TemplateId};
use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension, Row, params};

use crate::columns::{format_timestamp, parse_timestamp};
use crate::database::{Database, map_tr_err};
use crate::models::NewDeviation;

const SELECT_DEVIATION: &str =
    "SELECT d.id, d.schedule_id, d.template_id, t.site_message_id, d.active_from, d.active_until
     FROM deviations d
     LEFT JOIN deviation_templates t ON t.id = d.template_id";

fn deviation_from_row(row: &Row<'_>) -> rusqlite::Result<Deviation> {
    let active_from: String = row.get(4)?;
    let active_until: String = row.get(5)?;
    Ok(Deviation {
        id: DeviationId(row.get(0)?),
        schedule_id: ScheduleId(row.get(1)?),
        template_id: row.get::<_, Option<i64>>(2)?.map(TemplateId),
        site_message_id: row.get::<_, Option<i64>>(3)?.map(SiteMessageId),
        active_from: parse_timestamp(4, &active_from)?,
        active_until: parse_timestamp(5, &active_until)?,
    })
}

/// Insert a deviation and return its id.
pub async fn insert_deviation(db: &Database, new: &NewDeviation) -> Result<DeviationId, AriaError> {
    let new = new.clone();
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            conn.execute(
                "INSERT INTO deviations (schedule_id, template_id, active_from, active_until)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    new.schedule_id.0,
                    new.template_id.map(|t| t.0),
                    format_timestamp(new.active_from),
                    format_timestamp(new.active_until),
                ],
            )?;
            Ok(DeviationId(conn.last_insert_rowid()))
        })
        .await
        .map_err(map_tr_err)
}

/// Overwrite a deviation's owner, template and window. Returns `false` when
/// no such deviation exists. `site_message_id` is derived and not written.
pub async fn update_deviation(db: &Database, deviation: &Deviation) -> Result<bool, AriaError> {
    let deviation = deviation.clone();
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            let changed = conn.execute(
                "UPDATE deviations
                 SET schedule_id = ?1, template_id = ?2, active_from = ?3, active_until = ?4
                 WHERE id = ?5",
                params![
                    deviation.schedule_id.0,
                    deviation.template_id.map(|t| t.0),
                    format_timestamp(deviation.active_from),
                    format_timestamp(deviation.active_until),
                    deviation.id.0,
                ],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Delete a deviation and, by cascade, its slots. Returns `false` when no
/// such deviation exists.
pub async fn delete_deviation(db: &Database, id: DeviationId) -> Result<bool, AriaError> {
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            let changed = conn.execute("DELETE FROM deviations WHERE id = ?1", params![id.0])?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Get a deviation by id.
pub async fn get_deviation(db: &Database, id: DeviationId) -> Result<Option<Deviation>, AriaError> {
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            conn.query_row(
                &format!("{SELECT_DEVIATION} WHERE d.id = ?1"),
                params![id.0],
                deviation_from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// The deviation covering `now`. Overlaps resolve to the latest start, then
/// the highest id.
pub async fn active_deviation(
    db: &Database,
    schedule_id: ScheduleId,
    now: DateTime<Utc>,
) -> Result<Option<Deviation>, AriaError> {
    let now = format_timestamp(now);
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            conn.query_row(
                &format!(
                    "{SELECT_DEVIATION}
                     WHERE d.schedule_id = ?1 AND d.active_from <= ?2 AND d.active_until > ?2
                     ORDER BY d.active_from DESC, d.id DESC
                     LIMIT 1"
                ),
                params![schedule_id.0, now],
                deviation_from_row,
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Earliest `active_from` strictly after `now` for the schedule.
pub async fn next_deviation_start(
    db: &Database,
    schedule_id: ScheduleId,
    now: DateTime<Utc>,
) -> Result<Option<DateTime<Utc>>, AriaError> {
    let now = format_timestamp(now);
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            let next: Option<String> = conn.query_row(
                "SELECT MIN(active_from) FROM deviations
                 WHERE schedule_id = ?1 AND active_from > ?2",
                params![schedule_id.0, now],
                |row| row.get(0),
            )?;
            next.map(|raw| parse_timestamp(0, &raw)).transpose()
        })
        .await
        .map_err(map_tr_err)
}
