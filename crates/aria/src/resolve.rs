// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `aria resolve`: print a schedule's effective opening hours.

use std::io::IsTerminal;
use std::sync::Arc;

use aria_config::AriaConfig;
use aria_core::{AriaError, OpeningHoursRecord, OpeningHoursResponse, ScheduleId, TimeSlotStore};
use aria_hours::{CacheInvalidator, MemoryCache, OpeningHoursResolver, ResolverSettings};
use aria_storage::SqliteStore;
use chrono::{DateTime, Utc};
use tracing::debug;

/// Build a resolver over the configured SQLite store. The in-process cache
/// is wired both into the resolver and, as an invalidator, into the store.
pub async fn open_resolver(
    config: &AriaConfig,
) -> Result<(Arc<SqliteStore>, OpeningHoursResolver), AriaError> {
    let settings = ResolverSettings::from_config(config);
    let cache = Arc::new(MemoryCache::new());
    let store = Arc::new(
        SqliteStore::open(&config.storage)
            .await?
            .with_observer(Arc::new(CacheInvalidator::new(
                cache.clone(),
                settings.key_prefix.clone(),
            ))),
    );
    let resolver = OpeningHoursResolver::new(store.clone(), settings).with_cache(cache);
    Ok((store, resolver))
}

/// Run the `aria resolve` command.
pub async fn run_resolve(
    config: &AriaConfig,
    schedule_id: i64,
    at: DateTime<Utc>,
    json: bool,
    plain: bool,
) -> Result<(), AriaError> {
    let id = ScheduleId(schedule_id);
    let (store, resolver) = open_resolver(config).await?;
    let record = resolver.opening_hours_detail(id, at).await?;
    debug!(schedule_id = %id, at = %at, "resolved opening hours");

    if json {
        let response = OpeningHoursResponse::from(&record);
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let name = store
        .get_schedule(id)
        .await?
        .map(|schedule| schedule.name)
        .unwrap_or_else(|| format!("schedule {id}"));
    let use_color = !plain && std::io::stdout().is_terminal();
    print!("{}", render_table(&name, &record, use_color));
    Ok(())
}

/// Human-readable table of the resolved runs.
fn render_table(name: &str, record: &OpeningHoursRecord, use_color: bool) -> String {
    use colored::Colorize;

    let width = record
        .human_readable_time_slots
        .iter()
        .map(|run| run.days.len())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    out.push('\n');
    out.push_str(&format!("  {name} (#{})\n", record.schedule_id));
    out.push_str(&format!("  {}\n", "-".repeat(35)));

    if record.human_readable_time_slots.is_empty() {
        out.push_str("    no opening hours configured\n");
    }

    for run in &record.human_readable_time_slots {
        let hours = match (&run.time_slot, run.is_closed) {
            (_, true) => "closed".to_string(),
            (Some(slot), false) => slot.clone(),
            (None, false) => "hours unknown".to_string(),
        };
        let hours = if !use_color {
            hours
        } else if run.is_closed {
            hours.red().to_string()
        } else {
            hours.green().to_string()
        };
        out.push_str(&format!("    {:<width$}  {hours}\n", run.days));
    }

    if let Some(deviation_id) = record.deviation_id {
        let note = format!("deviation #{deviation_id} applied");
        let note = if use_color { note.yellow().to_string() } else { note };
        out.push_str(&format!("\n  {note}\n"));
    }
    out.push('\n');
    out
}
