//! Test modules for Prefix Search.
//!
//! This module contains the crate-internal test suites:
//! - Configuration loading and validation
//! - Property-based tests of the index using proptest
//! - Test fixtures and utilities

pub mod test_utils;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::{key_strategy, RecordingObserver, TestFixture};
