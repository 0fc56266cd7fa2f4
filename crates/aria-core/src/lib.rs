// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for Aria opening hours.
//!
//! This crate provides the domain types, the error type, and the collaborator
//! traits (store, cache, write observer) that the resolver and its concrete
//! backends agree on.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::AriaError;
pub use types::{
    Deviation, DeviationId, DeviationTemplate, HumanReadableRun, HumanReadableRunResponse,
    OpeningHoursRecord, OpeningHoursResponse, Schedule, ScheduleId, SiteMessageId, TemplateId,
    TimeSlot, Weekday,
};

pub use traits::{Cache, TimeSlotStore, WriteObserver};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aria_error_has_all_variants() {
        let _not_found = AriaError::NotFound {
            entity: "schedule",
            id: "1".into(),
        };
        let _inconsistent = AriaError::InconsistentData("test".into());
        let _store = AriaError::StoreUnavailable {
            source: Box::new(std::io::Error::other("test")),
        };
        let _cache = AriaError::Cache {
            source: Box::new(std::io::Error::other("test")),
        };
        let _serde = AriaError::Serialization {
            source: Box::new(std::io::Error::other("test")),
        };
        let _config = AriaError::Config("test".into());
        let _internal = AriaError::Internal("test".into());
    }

    #[test]
    fn not_found_renders_entity_and_id() {
        let err = AriaError::not_found("schedule", ScheduleId(42));
        assert_eq!(err.to_string(), "schedule not found: 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_store<T: TimeSlotStore>() {}
        fn _assert_cache<T: Cache>() {}
        fn _assert_observer<T: WriteObserver>() {}
    }
}
