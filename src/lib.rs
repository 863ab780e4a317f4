//! Prefix Search Library
//!
//! In-memory, case-insensitive prefix search over a fixed collection of
//! strings, or of JSON objects keyed by a chosen string field. The collection
//! is indexed once into a trie; after that, items can be added one at a time
//! and every item whose key starts with a given prefix can be listed.
//!
//! # Architecture
//!
//! - [`data_structures::prefix_trie`]: arena-backed trie with iterative
//!   insert and flatten
//! - [`index`]: the engine, with mode detection, build scheduling and the
//!   public add/search/size surface
//! - [`config`]: layered configuration for the index and logging
//! - [`error`]: crate-level error type

pub mod config;
pub mod data_structures;
pub mod dataset;
pub mod error;
pub mod index;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use index::{IndexError, IndexResult, PrefixIndex};

/// Version information for Prefix Search.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
