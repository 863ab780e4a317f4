// Copyright (c) 2025 Prefix Search Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error module for Prefix Search.
//!
//! Index operations return [`IndexError`](crate::index::IndexError) directly.
//! This module holds the crate-level error used where configuration, file
//! loading and indexing meet, such as the command-line host.

use thiserror::Error;

use crate::index::IndexError;

pub mod config;

/// Result type alias for crate-level operations.
pub type PrefixSearchResult<T> = Result<T, PrefixSearchError>;

/// Crate-level error enum.
#[derive(Error, Debug)]
pub enum PrefixSearchError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors raised by the prefix index.
    #[error("Index error: {0}")]
    Index(#[from] IndexError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/Deserialization errors.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}
