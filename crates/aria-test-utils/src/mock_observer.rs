// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! A `WriteObserver` that records every notification.

use std::sync::Mutex;

use async_trait::async_trait;

use aria_core::{ScheduleId, SiteMessageId, WriteObserver};

/// One notification received by [`RecordingObserver`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteEvent {
    ScheduleChanged(ScheduleId),
    SiteMessageChanged(SiteMessageId),
}

#[derive(Debug, Default)]
pub struct RecordingObserver {
    events: Mutex<Vec<WriteEvent>>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications in the order they arrived.
    pub fn events(&self) -> Vec<WriteEvent> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Return and forget everything recorded so far.
    pub fn take(&self) -> Vec<WriteEvent> {
        std::mem::take(&mut *self.events.lock().unwrap_or_else(|e| e.into_inner()))
    }

    fn push(&self, event: WriteEvent) {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).push(event);
    }
}

#[async_trait]
impl WriteObserver for RecordingObserver {
    async fn schedule_changed(&self, id: ScheduleId) {
        self.push(WriteEvent::ScheduleChanged(id));
    }

    async fn site_message_changed(&self, id: SiteMessageId) {
        self.push(WriteEvent::SiteMessageChanged(id));
    }
}
