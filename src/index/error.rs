// Copyright (c) 2025 Prefix Search Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the prefix index.
//!
//! This module defines the error types that can occur while constructing,
//! building, extending or querying a [`PrefixIndex`](super::PrefixIndex).

/// Errors that can occur in prefix index operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    /// Bad construction arguments.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An item's type is unrecognized or inconsistent with the index mode.
    #[error("Unsupported type: expected {expected}, found {found}")]
    UnsupportedType {
        /// What the index accepts at this point.
        expected: String,
        /// The JSON type that was supplied.
        found: String,
    },

    /// A keyed item does not carry the indexed field.
    #[error("Index property '{field}' does not exist on item")]
    MissingKeyField {
        /// Name of the indexed field.
        field: String,
    },

    /// The operation needs a built index, or the dataset is already consumed.
    #[error("Search engine has not been initialized")]
    NotInitialized,

    /// A search argument was absent or malformed.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The deferred build task panicked or was cancelled by the runtime.
    #[error("Deferred build task failed: {0}")]
    BuildTask(String),
}

/// Result type for prefix index operations.
pub type IndexResult<T> = Result<T, IndexError>;
