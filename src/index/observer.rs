// Copyright (c) 2025 Prefix Search Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Build observability.
//!
//! Each index holds its own observer; there is no process-wide sink.

use std::time::Duration;

/// Summary of one completed build pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Dataset length, nulls included.
    pub items: usize,

    /// Elements inserted into the trie.
    pub indexed: usize,

    /// Null elements skipped.
    pub skipped: usize,

    /// Distinct keys in the trie after the pass.
    pub distinct_keys: usize,

    /// Wall time of the insertion pass.
    pub elapsed: Duration,

    /// Whether the pass ran on a deferred task.
    pub deferred: bool,
}

/// Sink for build reports.
pub trait BuildObserver: Send + Sync + std::fmt::Debug {
    /// Record a finished build.
    ///
    /// # Arguments
    ///
    /// * `report` - The report of the pass that just completed
    fn record(&self, report: &BuildReport);
}

/// Observer that logs build reports using the tracing framework.
#[derive(Default, Debug)]
pub struct TracingBuildObserver;

impl BuildObserver for TracingBuildObserver {
    fn record(&self, report: &BuildReport) {
        tracing::info!(
            items = report.items,
            indexed = report.indexed,
            skipped = report.skipped,
            distinct_keys = report.distinct_keys,
            elapsed_ms = report.elapsed.as_millis() as u64,
            deferred = report.deferred,
            "build finished"
        );
    }
}
