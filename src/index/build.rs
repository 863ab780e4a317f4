// Copyright (c) 2025 Prefix Search Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Bulk indexing pass and its scheduling.
//!
//! A pass always builds a fresh trie off to the side and installs it in one
//! step, so readiness only becomes visible once every element is in.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;

use futures::ready;
use parking_lot::RwLock;
use serde_json::Value;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::error::{IndexError, IndexResult};
use super::mode::IndexMode;
use super::observer::{BuildObserver, BuildReport};
use super::IndexState;
use crate::data_structures::prefix_trie::PrefixTrie;

/// Readiness of an index, broadcast to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadyState {
    /// No build has finished yet.
    Pending,
    /// The initial build completed; the index accepts queries.
    Ready,
    /// The initial build failed; the index will never become ready.
    Failed(IndexError),
}

/// Outcome of [`PrefixIndex::build`](super::PrefixIndex::build).
#[derive(Debug)]
pub enum BuildStatus {
    /// The pass ran synchronously and the index is ready.
    Completed(BuildReport),
    /// The pass was handed to a background task.
    Deferred(BuildHandle),
}

impl BuildStatus {
    /// Returns `true` if the pass was deferred.
    pub fn is_deferred(&self) -> bool {
        matches!(self, BuildStatus::Deferred(_))
    }

    /// Waits for the pass to finish, whichever way it was scheduled.
    pub async fn wait(self) -> IndexResult<BuildReport> {
        match self {
            BuildStatus::Completed(report) => Ok(report),
            BuildStatus::Deferred(handle) => handle.await,
        }
    }
}

/// Completion future of a deferred build.
///
/// Dropping the handle detaches the task; the build still runs to the end.
#[derive(Debug)]
pub struct BuildHandle {
    inner: JoinHandle<IndexResult<BuildReport>>,
}

impl BuildHandle {
    pub(super) fn new(inner: JoinHandle<IndexResult<BuildReport>>) -> Self {
        Self { inner }
    }

    /// Returns `true` once the background task has finished.
    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }
}

impl Future for BuildHandle {
    type Output = IndexResult<BuildReport>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let joined = ready!(Pin::new(&mut self.inner).poll(cx));
        Poll::Ready(joined.unwrap_or_else(|e| Err(IndexError::BuildTask(e.to_string()))))
    }
}

/// Everything a build pass needs, detached from the index so it can move
/// onto another thread.
pub(super) struct BuildJob {
    pub(super) state: Arc<RwLock<IndexState>>,
    pub(super) mode: IndexMode,
    pub(super) observer: Arc<dyn BuildObserver>,
    pub(super) ready_tx: Arc<watch::Sender<ReadyState>>,
}

impl BuildJob {
    /// Indexes `dataset`, installs the trie and flips readiness.
    pub(super) fn run(self, dataset: Vec<Value>, deferred: bool) -> IndexResult<BuildReport> {
        match index_dataset(dataset, &self.mode, deferred) {
            Ok((trie, report)) => {
                {
                    let mut state = self.state.write();
                    state.trie = trie;
                    state.ready = true;
                }
                self.ready_tx.send_replace(ReadyState::Ready);
                self.observer.record(&report);
                Ok(report)
            }
            Err(e) => {
                tracing::debug!(error = %e, deferred, "build failed");
                self.ready_tx.send_replace(ReadyState::Failed(e.clone()));
                Err(e)
            }
        }
    }
}

impl Drop for BuildJob {
    /// Settles readiness when the job goes away without finishing, either
    /// because the runtime dropped the task before it ran or because the pass
    /// panicked.
    fn drop(&mut self) {
        let settled = self.ready_tx.send_if_modified(|state| {
            if *state == ReadyState::Pending {
                *state = ReadyState::Failed(IndexError::BuildTask(
                    "build dropped before completion".to_string(),
                ));
                true
            } else {
                false
            }
        });
        if settled {
            tracing::warn!("build job dropped before completion");
        }
    }
}

/// Inserts every non-null element of `dataset` into a new trie.
fn index_dataset(
    dataset: Vec<Value>,
    mode: &IndexMode,
    deferred: bool,
) -> IndexResult<(PrefixTrie<Value>, BuildReport)> {
    let start = Instant::now();
    let items = dataset.len();
    let mut trie = PrefixTrie::new();
    let mut skipped = 0;

    for item in dataset {
        if item.is_null() {
            skipped += 1;
            continue;
        }
        let key = mode.key_of(&item)?;
        trie.insert(&key, item);
    }

    let report = BuildReport {
        items,
        indexed: items - skipped,
        skipped,
        distinct_keys: trie.len(),
        elapsed: start.elapsed(),
        deferred,
    };
    Ok((trie, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_index_dataset_skips_nulls() {
        let dataset = vec![json!("Apple"), json!(null), json!("apple"), json!("Apt")];
        let (trie, report) = index_dataset(dataset, &IndexMode::Plain, false).unwrap();

        assert_eq!(report.items, 4);
        assert_eq!(report.indexed, 3);
        assert_eq!(report.skipped, 1);
        assert_eq!(report.distinct_keys, 2);
        assert!(!report.deferred);

        // Last write wins for duplicate keys
        assert_eq!(trie.find_by_prefix("apple", None), vec![&json!("apple")]);
    }

    #[test]
    fn test_index_dataset_stops_at_first_bad_element() {
        let mode = IndexMode::Keyed { field: "name".to_string() };
        let dataset = vec![json!({"name": "Tom"}), json!({"nick": "T"}), json!({"name": "Ann"})];

        assert_eq!(
            index_dataset(dataset, &mode, false).map(|_| ()),
            Err(IndexError::MissingKeyField { field: "name".to_string() })
        );
    }

    fn job(ready_tx: &Arc<watch::Sender<ReadyState>>) -> BuildJob {
        BuildJob {
            state: Arc::new(RwLock::new(IndexState {
                trie: PrefixTrie::new(),
                dataset: None,
                ready: false,
            })),
            mode: IndexMode::Plain,
            observer: Arc::new(crate::index::TracingBuildObserver),
            ready_tx: Arc::clone(ready_tx),
        }
    }

    #[test]
    fn test_dropped_job_marks_build_failed() {
        let (tx, rx) = watch::channel(ReadyState::Pending);
        let tx = Arc::new(tx);

        drop(job(&tx));

        assert!(matches!(*rx.borrow(), ReadyState::Failed(IndexError::BuildTask(_))));
    }

    #[test]
    fn test_finished_job_keeps_ready_state_on_drop() {
        let (tx, rx) = watch::channel(ReadyState::Pending);
        let tx = Arc::new(tx);

        let report = job(&tx).run(vec![json!("a")], false).unwrap();

        assert_eq!(report.distinct_keys, 1);
        assert_eq!(*rx.borrow(), ReadyState::Ready);
    }

    #[test]
    fn test_build_status_is_deferred() {
        let report = BuildReport {
            items: 0,
            indexed: 0,
            skipped: 0,
            distinct_keys: 0,
            elapsed: std::time::Duration::ZERO,
            deferred: false,
        };
        assert!(!BuildStatus::Completed(report).is_deferred());
    }
}
