// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Opening hours resolution.
//!
//! Turns a schedule's weekly time slots, plus whichever deviation is active,
//! into a display record with human-readable runs such as
//! `Monday - Thursday: 09:00 - 17:00`. Resolved records are cached behind the
//! [`aria_core::Cache`] collaborator and invalidated explicitly through
//! [`invalidation::CacheInvalidator`].

pub mod cache;
pub mod invalidation;
pub mod merger;
pub mod resolver;
pub mod selector;

pub use cache::{CachedRecord, MemoryCache};
pub use invalidation::{CacheInvalidator, invalidate_schedule_cache, invalidate_site_message_cache};
pub use merger::{SlotMerger, merge_time_slots};
pub use resolver::{OpeningHoursResolver, ResolverSettings, splice_deviation};
pub use selector::select_active_deviation;
