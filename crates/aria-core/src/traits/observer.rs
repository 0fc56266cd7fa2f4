// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-write hook fired by persistence backends.

use async_trait::async_trait;

use crate::types::{ScheduleId, SiteMessageId};

/// Receives notifications after a successful write.
///
/// Observers run after the write has committed and cannot fail it.
#[async_trait]
pub trait WriteObserver: Send + Sync {
    /// A schedule, one of its slots, or one of its deviations changed.
    async fn schedule_changed(&self, id: ScheduleId);

    /// A site message linked through a deviation template is affected.
    async fn site_message_changed(&self, id: SiteMessageId);
}
