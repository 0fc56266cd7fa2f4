// SPDX-FileCopyrightText: 2026 Aria Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for Aria opening hours.

use std::fmt::Display;

use thiserror::Error;

/// The primary error type used across the collaborator traits and the resolver.
#[derive(Debug, Error)]
pub enum AriaError {
    /// The requested entity does not exist in the store.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A time slot or deviation violates a data invariant.
    ///
    /// Only raised on the write path. Readers treat malformed slots leniently.
    #[error("inconsistent data: {0}")]
    InconsistentData(String),

    /// Persistence backend failure (connection, query, row decoding).
    #[error("store unavailable: {source}")]
    StoreUnavailable {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Cache backend failure. Never escapes the resolver.
    #[error("cache error: {source}")]
    Cache {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Encoding or decoding of a cached or wire value failed.
    #[error("serialization error: {source}")]
    Serialization {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration errors surfaced at runtime.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AriaError {
    /// Shorthand for [`AriaError::NotFound`].
    pub fn not_found(entity: &'static str, id: impl Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Wrap any backend error as [`AriaError::StoreUnavailable`].
    pub fn store<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::StoreUnavailable {
            source: Box::new(err),
        }
    }

    /// Returns true for [`AriaError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<serde_json::Error> for AriaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            source: Box::new(err),
        }
    }
}
