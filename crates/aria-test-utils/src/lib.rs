// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Aria opening hours.
//!
//! Provides in-memory collaborators for fast, deterministic tests without a
//! database.
//!
//! # Components
//!
//! - [`MockStore`] - In-memory `TimeSlotStore` that counts every call
//! - [`FailingCache`] - Cache whose every operation errors
//! - [`RecordingCache`] - Non-expiring cache that records the TTL of each write
//! - [`RecordingObserver`] - Write observer that logs every notification
//! - [`fixtures`] - Reference weeks and deviations

pub mod fixtures;
pub mod mock_cache;
pub mod mock_observer;
pub mod mock_store;

pub use mock_cache::{FailingCache, RecordingCache};
pub use mock_observer::{RecordingObserver, WriteEvent};
pub use mock_store::{CallCounts, MockStore};
