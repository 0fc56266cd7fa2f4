// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the TimeSlotStore trait, plus the write path.
//!
//! Every successful write notifies the registered [`WriteObserver`]s so that
//! cached opening hours never outlive the rows they were built from.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Datelike, Timelike, Utc};
use tracing::{debug, info};

use aria_config::StorageConfig;
use aria_core::{
    AriaError, Deviation, DeviationId, DeviationTemplate, Schedule, ScheduleId, SiteMessageId,
    TemplateId, TimeSlot, TimeSlotStore, WriteObserver,
};

use crate::database::Database;
use crate::models::NewDeviation;
use crate::queries;

fn validate_slot(slot: &TimeSlot) -> Result<(), AriaError> {
    let sub_second = [slot.opening_time, slot.closing_time]
        .into_iter()
        .flatten()
        .any(|time| time.nanosecond() != 0);
    if sub_second {
        return Err(AriaError::InconsistentData(format!(
            "{}: times are stored with whole-second precision",
            slot.weekday
        )));
    }
    if slot.is_consistent() {
        return Ok(());
    }
    let reason = if slot.is_closed {
        "closed slot must not carry opening or closing times"
    } else {
        "open slot needs both an opening and a closing time"
    };
    Err(AriaError::InconsistentData(format!("{}: {reason}", slot.weekday)))
}

fn validate_window(from: DateTime<Utc>, until: DateTime<Utc>) -> Result<(), AriaError> {
    for at in [from, until] {
        if !(0..=9999).contains(&at.year()) {
            return Err(AriaError::InconsistentData(format!(
                "deviation bound {at} is outside years 0000-9999"
            )));
        }
    }
    if until <= from {
        return Err(AriaError::InconsistentData(format!(
            "deviation must end after it starts ({from} .. {until})"
        )));
    }
    Ok(())
}

/// SQLite-backed schedule store.
///
/// Reads implement [`TimeSlotStore`]. Writes validate their input, report
/// unknown parents as [`AriaError::NotFound`] and then notify observers.
pub struct SqliteStore {
    db: Database,
    observers: Vec<Arc<dyn WriteObserver>>,
}

impl SqliteStore {
    pub fn new(db: Database) -> Self {
        Self {
            db,
            observers: Vec::new(),
        }
    }

    /// Open the database described by `config` and run migrations.
    pub async fn open(config: &StorageConfig) -> Result<Self, AriaError> {
        let db = Database::open(&config.database_path, config.wal_mode).await?;
        debug!(path = %config.database_path, "SQLite store initialized");
        Ok(Self::new(db))
    }

    /// Register an observer for successful writes.
    pub fn with_observer(mut self, observer: Arc<dyn WriteObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Checkpoint and close the underlying database.
    pub async fn close(self) -> Result<(), AriaError> {
        self.db.close().await
    }

    async fn require_schedule(&self, id: ScheduleId) -> Result<(), AriaError> {
        if queries::schedules::schedule_exists(&self.db, id).await? {
            Ok(())
        } else {
            Err(AriaError::not_found("schedule", id))
        }
    }

    async fn require_template(&self, id: TemplateId) -> Result<DeviationTemplate, AriaError> {
        queries::templates::get_template(&self.db, id)
            .await?
            .ok_or_else(|| AriaError::not_found("template", id))
    }

    async fn require_deviation(&self, id: DeviationId) -> Result<Deviation, AriaError> {
        queries::deviations::get_deviation(&self.db, id)
            .await?
            .ok_or_else(|| AriaError::not_found("deviation", id))
    }

    /// Notify observers once per distinct schedule and site message.
    async fn notify(&self, schedules: &[ScheduleId], messages: &[Option<SiteMessageId>]) {
        let mut seen_schedules = Vec::new();
        for id in schedules {
            if seen_schedules.contains(id) {
                continue;
            }
            seen_schedules.push(*id);
            for observer in &self.observers {
                observer.schedule_changed(*id).await;
            }
        }

        let mut seen_messages = Vec::new();
        for id in messages.iter().flatten() {
            if seen_messages.contains(id) {
                continue;
            }
            seen_messages.push(*id);
            for observer in &self.observers {
                observer.site_message_changed(*id).await;
            }
        }
    }

    // --- Schedule writes ---

    pub async fn create_schedule(&self, name: &str) -> Result<Schedule, AriaError> {
        let id = queries::schedules::insert_schedule(&self.db, name).await?;
        info!(schedule_id = %id, "schedule created");
        self.notify(&[id], &[]).await;
        Ok(Schedule::new(id, name))
    }

    pub async fn rename_schedule(&self, id: ScheduleId, name: &str) -> Result<(), AriaError> {
        if !queries::schedules::rename_schedule(&self.db, id, name).await? {
            return Err(AriaError::not_found("schedule", id));
        }
        self.notify(&[id], &[]).await;
        Ok(())
    }

    /// Set one weekday of a schedule's base week.
    pub async fn upsert_time_slot(
        &self,
        schedule_id: ScheduleId,
        slot: &TimeSlot,
    ) -> Result<(), AriaError> {
        validate_slot(slot)?;
        self.require_schedule(schedule_id).await?;
        queries::time_slots::upsert_time_slot(&self.db, schedule_id, slot).await?;
        debug!(schedule_id = %schedule_id, weekday = %slot.weekday, "time slot saved");
        self.notify(&[schedule_id], &[]).await;
        Ok(())
    }

    // --- Template writes ---

    pub async fn create_template(
        &self,
        name: &str,
        site_message_id: Option<SiteMessageId>,
    ) -> Result<DeviationTemplate, AriaError> {
        let id = queries::templates::insert_template(&self.db, name, site_message_id).await?;
        info!(template_id = %id, "deviation template created");
        Ok(DeviationTemplate {
            id,
            name: name.to_string(),
            site_message_id,
        })
    }

    /// Overwrite a template. Every schedule with a deviation using it is
    /// invalidated, as are the previously and newly linked site messages.
    pub async fn update_template(&self, template: &DeviationTemplate) -> Result<(), AriaError> {
        let previous = self.require_template(template.id).await?;
        if !queries::templates::update_template(&self.db, template).await? {
            return Err(AriaError::not_found("template", template.id));
        }
        let affected = queries::templates::schedules_using_template(&self.db, template.id).await?;
        info!(
            template_id = %template.id,
            schedules = affected.len(),
            "deviation template updated"
        );
        self.notify(
            &affected,
            &[previous.site_message_id, template.site_message_id],
        )
        .await;
        Ok(())
    }

    // --- Deviation writes ---

    pub async fn create_deviation(&self, new: &NewDeviation) -> Result<Deviation, AriaError> {
        validate_window(new.active_from, new.active_until)?;
        self.require_schedule(new.schedule_id).await?;
        if let Some(template_id) = new.template_id {
            self.require_template(template_id).await?;
        }

        let id = queries::deviations::insert_deviation(&self.db, new).await?;
        let deviation = queries::deviations::get_deviation(&self.db, id)
            .await?
            .ok_or_else(|| AriaError::Internal(format!("deviation {id} vanished after insert")))?;
        info!(
            schedule_id = %deviation.schedule_id,
            deviation_id = %id,
            "deviation created"
        );
        self.notify(&[deviation.schedule_id], &[deviation.site_message_id])
            .await;
        Ok(deviation)
    }

    /// Overwrite a deviation's owner, template and window. Returns the stored
    /// row with its template's site message resolved.
    pub async fn update_deviation(&self, deviation: &Deviation) -> Result<Deviation, AriaError> {
        validate_window(deviation.active_from, deviation.active_until)?;
        let previous = self.require_deviation(deviation.id).await?;
        self.require_schedule(deviation.schedule_id).await?;
        if let Some(template_id) = deviation.template_id {
            self.require_template(template_id).await?;
        }

        if !queries::deviations::update_deviation(&self.db, deviation).await? {
            return Err(AriaError::not_found("deviation", deviation.id));
        }
        let current = self.require_deviation(deviation.id).await?;
        info!(deviation_id = %current.id, "deviation updated");
        self.notify(
            &[previous.schedule_id, current.schedule_id],
            &[previous.site_message_id, current.site_message_id],
        )
        .await;
        Ok(current)
    }

    pub async fn delete_deviation(&self, id: DeviationId) -> Result<(), AriaError> {
        let previous = self.require_deviation(id).await?;
        if !queries::deviations::delete_deviation(&self.db, id).await? {
            return Err(AriaError::not_found("deviation", id));
        }
        info!(deviation_id = %id, "deviation deleted");
        self.notify(&[previous.schedule_id], &[previous.site_message_id])
            .await;
        Ok(())
    }

    /// Set one weekday of a deviation.
    pub async fn upsert_deviation_slot(
        &self,
        deviation_id: DeviationId,
        slot: &TimeSlot,
    ) -> Result<(), AriaError> {
        validate_slot(slot)?;
        let deviation = self.require_deviation(deviation_id).await?;
        queries::time_slots::upsert_deviation_slot(&self.db, deviation_id, slot).await?;
        debug!(deviation_id = %deviation_id, weekday = %slot.weekday, "deviation slot saved");
        self.notify(&[deviation.schedule_id], &[deviation.site_message_id])
            .await;
        Ok(())
    }

    // --- Listing helpers ---

    pub async fn list_schedules(&self) -> Result<Vec<Schedule>, AriaError> {
        queries::schedules::list_schedules(&self.db).await
    }

    pub async fn get_deviation(&self, id: DeviationId) -> Result<Option<Deviation>, AriaError> {
        queries::deviations::get_deviation(&self.db, id).await
    }
}

#[async_trait]
impl TimeSlotStore for SqliteStore {
    async fn get_schedule(&self, id: ScheduleId) -> Result<Option<Schedule>, AriaError> {
        queries::schedules::get_schedule(&self.db, id).await
    }

    async fn get_week(&self, id: ScheduleId) -> Result<Vec<TimeSlot>, AriaError> {
        self.require_schedule(id).await?;
        queries::time_slots::week_for_schedule(&self.db, id).await
    }

    async fn get_active_deviation(
        &self,
        id: ScheduleId,
        now: DateTime<Utc>,
    ) -> Result<Option<Deviation>, AriaError> {
        self.require_schedule(id).await?;
        queries::deviations::active_deviation(&self.db, id, now).await
    }

    async fn get_deviation_slots(&self, id: DeviationId) -> Result<Vec<TimeSlot>, AriaError> {
        self.require_deviation(id).await?;
        queries::time_slots::slots_for_deviation(&self.db, id).await
    }

    async fn get_next_deviation_start(
        &self,
        id: ScheduleId,
        now: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, AriaError> {
        self.require_schedule(id).await?;
        queries::deviations::next_deviation_start(&self.db, id, now).await
    }
}
