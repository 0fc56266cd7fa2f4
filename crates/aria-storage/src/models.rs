// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Write-side inputs that have no id yet.

use aria_core::{ScheduleId, TemplateId};
use chrono::{DateTime, Utc};

/// A deviation to be inserted. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDeviation {
    pub schedule_id: ScheduleId,
    pub template_id: Option<TemplateId>,
    pub active_from: DateTime<Utc>,
    pub active_until: DateTime<Utc>,
}
