// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `aria migrate`: create the database and apply pending migrations.

use aria_config::AriaConfig;
use aria_core::AriaError;
use aria_storage::Database;
use tracing::info;

pub async fn run_migrate(config: &AriaConfig) -> Result<(), AriaError> {
    let path = &config.storage.database_path;
    let db = Database::open(path, config.storage.wal_mode).await?;
    db.close().await?;
    info!(path = %path, "database is up to date");
    println!("database ready: {path}");
    Ok(())
}
