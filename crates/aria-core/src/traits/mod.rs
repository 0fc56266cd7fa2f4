// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! The resolver consumes a [`TimeSlotStore`] and an optional [`Cache`];
//! persistence backends notify [`WriteObserver`]s after every write.
//! All traits use `#[async_trait]` for dynamic dispatch compatibility.

pub mod cache;
pub mod observer;
pub mod store;

pub use cache::Cache;
pub use observer::WriteObserver;
pub use store::TimeSlotStore;
