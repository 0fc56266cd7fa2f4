// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for Aria opening hours.
//!
//! Provides WAL-mode SQLite storage with embedded migrations, a single-writer
//! concurrency model via `tokio-rusqlite`, typed queries for schedules, time
//! slots, templates and deviations, and [`SqliteStore`], the
//! [`aria_core::TimeSlotStore`] implementation that notifies write observers.

pub mod adapter;
mod columns;
pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

pub use adapter::SqliteStore;
pub use database::Database;
pub use models::NewDeviation;
