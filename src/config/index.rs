// Copyright (c) 2025 Prefix Search Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Index configuration module.
//!
//! Tuning for build scheduling and query behavior of a
//! [`PrefixIndex`](crate::index::PrefixIndex).

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Dataset length above which builds are deferred to a background task.
pub const DEFAULT_DEFER_THRESHOLD: usize = 50_000;

/// Index configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Builds over datasets longer than this run on a background task
    pub defer_threshold: usize,

    /// Whether query terms are lowercased before descent.
    ///
    /// Keys are always lowercased at insertion. Turning this off makes
    /// queries containing uppercase characters match nothing.
    pub normalize_queries: bool,

    /// Upper bound on the number of results a search returns
    pub max_results: Option<usize>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            defer_threshold: DEFAULT_DEFER_THRESHOLD,
            normalize_queries: true,
            max_results: None,
        }
    }
}

impl Validate for IndexConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.defer_threshold == 0 {
            return Err(ConfigError::ValidationError(
                "defer_threshold must be greater than 0".to_string(),
            ));
        }

        if self.max_results == Some(0) {
            return Err(ConfigError::ValidationError(
                "max_results must be greater than 0 when set".to_string(),
            ));
        }

        Ok(())
    }
}
