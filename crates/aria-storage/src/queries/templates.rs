// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deviation template CRUD operations.

use aria_core::{AriaError, DeviationTemplate, ScheduleId, SiteMessageId, TemplateId};
use rusqlite::{OptionalExtension, params};

use crate::database::{Database, map_tr_err};

/// Insert a template and return its id.
pub async fn insert_template(
    db: &Database,
    name: &str,
    site_message_id: Option<SiteMessageId>,
) -> Result<TemplateId, AriaError> {
    let name = name.to_string();
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            conn.execute(
                "INSERT INTO deviation_templates (name, site_message_id) VALUES (?1, ?2)",
                params![name, site_message_id.map(|m| m.0)],
            )?;
            Ok(TemplateId(conn.last_insert_rowid()))
        })
        .await
        .map_err(map_tr_err)
}

/// Overwrite a template's name and site message link. Returns `false` when
/// no such template exists.
pub async fn update_template(db: &Database, template: &DeviationTemplate) -> Result<bool, AriaError> {
    let template = template.clone();
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            let changed = conn.execute(
                "UPDATE deviation_templates SET name = ?1, site_message_id = ?2 WHERE id = ?3",
                params![
                    template.name,
                    template.site_message_id.map(|m| m.0),
                    template.id.0
                ],
            )?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_tr_err)
}

/// Get a template by id.
pub async fn get_template(
    db: &Database,
    id: TemplateId,
) -> Result<Option<DeviationTemplate>, AriaError> {
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            conn.query_row(
                "SELECT id, name, site_message_id FROM deviation_templates WHERE id = ?1",
                params![id.0],
                |row| {
                    Ok(DeviationTemplate {
                        id: TemplateId(row.get(0)?),
                        name: row.get(1)?,
                        site_message_id: row.get::<_, Option<i64>>(2)?.map(SiteMessageId),
                    })
                },
            )
            .optional()
        })
        .await
        .map_err(map_tr_err)
}

/// Distinct schedules that own at least one deviation using the template.
pub async fn schedules_using_template(
    db: &Database,
    id: TemplateId,
) -> Result<Vec<ScheduleId>, AriaError> {
    db.connection()
        .call(move |conn| -> Result<_, rusqlite::Error> {
            let mut stmt = conn.prepare(
                "SELECT DISTINCT schedule_id FROM deviations
                 WHERE template_id = ?1 ORDER BY schedule_id",
            )?;
            let rows = stmt.query_map(params![id.0], |row| row.get(0).map(ScheduleId))?;
            rows.collect::<Result<Vec<_>, _>>()
        })
        .await
        .map_err(map_tr_err)
}
