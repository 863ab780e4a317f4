// Copyright (c) 2025 Prefix Search Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Loading datasets from JSON files.

use std::path::Path;

use serde_json::Value;

use crate::error::{PrefixSearchError, PrefixSearchResult};

/// Reads a JSON array from `path`.
///
/// # Errors
///
/// IO and parse errors are passed through; a document that is not an array
/// yields `PrefixSearchError::Custom`.
pub fn load_dataset<P: AsRef<Path>>(path: P) -> PrefixSearchResult<Vec<Value>> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path)?;

    match serde_json::from_str(&contents)? {
        Value::Array(items) => {
            tracing::debug!(path = %path.display(), items = items.len(), "dataset loaded");
            Ok(items)
        }
        _ => Err(PrefixSearchError::Custom(format!(
            "Dataset {} must be a JSON array",
            path.display()
        ))),
    }
}
