// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed queries, one module per table family.

pub mod deviations;
pub mod schedules;
pub mod templates;
pub mod time_slots;
