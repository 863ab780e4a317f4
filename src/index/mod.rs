// Copyright (c) 2025 Prefix Search Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Prefix index over strings or keyed objects.
//!
//! A [`PrefixIndex`] is constructed from a dataset, built once, and then
//! answers "every item whose key starts with P" queries. Keys are lowercased
//! on the way in, and by default so are query terms.
//!
//! # Example
//!
//! ```
//! use prefix_search_lib::index::PrefixIndex;
//!
//! let index = PrefixIndex::from_strings(["Apple", "App", "Apt", "Banana"]).unwrap();
//! index.build().unwrap();
//!
//! assert_eq!(index.size(), 4);
//! assert_eq!(index.search("ap").unwrap().len(), 3);
//! assert!(index.search("z").unwrap().is_empty());
//! ```
//!
//! # Deferred builds
//!
//! Datasets larger than [`IndexConfig::defer_threshold`] are indexed on the
//! tokio blocking pool. [`PrefixIndex::build`] then returns
//! [`BuildStatus::Deferred`] straight away and the index stays not-ready until
//! the returned [`BuildHandle`] resolves. Callers that did not keep the handle
//! can use [`PrefixIndex::wait_until_ready`] or [`PrefixIndex::subscribe_ready`].

mod build;
mod error;
mod mode;
mod observer;

use std::borrow::Cow;
use std::sync::Arc;

use parking_lot::RwLock;
use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::watch;

pub use build::{BuildHandle, BuildStatus, ReadyState};
pub use error::{IndexError, IndexResult};
pub use mode::{normalize, IndexMode};
pub use observer::{BuildObserver, BuildReport, TracingBuildObserver};

use crate::config::index::IndexConfig;
use crate::config::Validate;
use crate::data_structures::prefix_trie::PrefixTrie;
use build::BuildJob;

/// Mutable part of the index, shared with a deferred build task.
#[derive(Debug)]
struct IndexState {
    trie: PrefixTrie<Value>,
    dataset: Option<Vec<Value>>,
    ready: bool,
}

/// What [`PrefixIndex::add`] did with an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    /// The key was new and the size grew by one.
    Inserted,
    /// The key existed; its payload was overwritten.
    Replaced,
    /// The item was null and nothing changed.
    Ignored,
}

/// Case-insensitive prefix index.
///
/// The index has a single logical owner. Internal locking exists only so a
/// deferred build can install its result; it gives no snapshot guarantee
/// for a search that races an `add`.
#[derive(Debug)]
pub struct PrefixIndex {
    state: Arc<RwLock<IndexState>>,
    mode: IndexMode,
    config: IndexConfig,
    observer: Arc<dyn BuildObserver>,
    ready_tx: Arc<watch::Sender<ReadyState>>,
}

impl PrefixIndex {
    /// Creates an index over `dataset` with default configuration.
    ///
    /// # Arguments
    ///
    /// * `dataset` - Items to index; strings, or objects carrying `key_field`.
    /// * `key_field` - Property to index objects on. Ignored for strings.
    ///
    /// # Errors
    ///
    /// See [`PrefixIndex::with_config`].
    pub fn new(dataset: Vec<Value>, key_field: Option<&str>) -> IndexResult<Self> {
        Self::with_config(dataset, key_field, IndexConfig::default())
    }

    /// Creates an index over `dataset` with the given configuration.
    ///
    /// The mode is fixed here from the first element.
    ///
    /// # Errors
    ///
    /// * `IndexError::Configuration` - empty dataset, invalid config, or an
    ///   object dataset without `key_field`.
    /// * `IndexError::UnsupportedType` - the first element is neither a string
    ///   nor an object.
    pub fn with_config(
        dataset: Vec<Value>,
        key_field: Option<&str>,
        config: IndexConfig,
    ) -> IndexResult<Self> {
        config
            .validate()
            .map_err(|e| IndexError::Configuration(e.to_string()))?;

        let first = dataset
            .first()
            .ok_or_else(|| IndexError::Configuration("dataset is empty".to_string()))?;
        let mode = IndexMode::detect(first, key_field)?;
        let (ready_tx, _) = watch::channel(ReadyState::Pending);

        Ok(Self {
            state: Arc::new(RwLock::new(IndexState {
                trie: PrefixTrie::new(),
                dataset: Some(dataset),
                ready: false,
            })),
            mode,
            config,
            observer: Arc::new(TracingBuildObserver),
            ready_tx: Arc::new(ready_tx),
        })
    }

    /// Creates a plain index from anything yielding strings.
    pub fn from_strings<I, S>(items: I) -> IndexResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dataset = items.into_iter().map(|s| Value::String(s.into())).collect();
        Self::new(dataset, None)
    }

    /// Replaces the build observer.
    pub fn with_observer(mut self, observer: Arc<dyn BuildObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Indexes the dataset given at construction.
    ///
    /// The dataset is consumed whether or not the pass succeeds. Datasets
    /// longer than the defer threshold are indexed on a background task when
    /// a tokio runtime is available; otherwise the pass runs inline.
    ///
    /// # Errors
    ///
    /// * `IndexError::NotInitialized` - the dataset was already consumed by a
    ///   previous call.
    /// * Any error from key derivation, for synchronous passes. Deferred
    ///   passes report these through the [`BuildHandle`].
    pub fn build(&self) -> IndexResult<BuildStatus> {
        let dataset = self
            .state
            .write()
            .dataset
            .take()
            .ok_or(IndexError::NotInitialized)?;

        if dataset.len() > self.config.defer_threshold {
            match Handle::try_current() {
                Ok(runtime) => {
                    tracing::debug!(items = dataset.len(), "deferred build scheduled");
                    let job = self.job();
                    let task = runtime.spawn_blocking(move || job.run(dataset, true));
                    return Ok(BuildStatus::Deferred(BuildHandle::new(task)));
                }
                Err(_) => {
                    tracing::warn!(
                        items = dataset.len(),
                        "no tokio runtime available, building synchronously"
                    );
                }
            }
        }

        self.job().run(dataset, false).map(BuildStatus::Completed)
    }

    fn job(&self) -> BuildJob {
        BuildJob {
            state: Arc::clone(&self.state),
            mode: self.mode.clone(),
            observer: Arc::clone(&self.observer),
            ready_tx: Arc::clone(&self.ready_tx),
        }
    }

    /// Inserts a single item into a built index.
    ///
    /// A null item is ignored.
    ///
    /// # Returns
    ///
    /// * `Ok(AddOutcome)` - whether the key was inserted, replaced an
    ///   existing entry, or the item was null and ignored.
    /// * `Err(IndexError)` - `NotInitialized` before the build finished,
    ///   `UnsupportedType` or `MissingKeyField` for items that do not fit.
    pub fn add(&self, item: Value) -> IndexResult<AddOutcome> {
        let mut state = self.state.write();
        if !state.ready {
            return Err(IndexError::NotInitialized);
        }
        if item.is_null() {
            return Ok(AddOutcome::Ignored);
        }

        let key = self.mode.key_of(&item)?;
        if state.trie.insert(&key, item) {
            Ok(AddOutcome::Inserted)
        } else {
            Ok(AddOutcome::Replaced)
        }
    }

    /// Finds every item whose key starts with `term`.
    ///
    /// Accepts `&str` or `Option<&str>`. An empty term yields no results.
    ///
    /// # Errors
    ///
    /// * `IndexError::NotInitialized` - the build has not finished.
    /// * `IndexError::InvalidArgument` - `term` is `None`.
    pub fn search<'a, T>(&self, term: T) -> IndexResult<Vec<Value>>
    where
        T: Into<Option<&'a str>>,
    {
        let state = self.state.read();
        if !state.ready {
            return Err(IndexError::NotInitialized);
        }

        let term = term
            .into()
            .ok_or_else(|| IndexError::InvalidArgument("undefined term".to_string()))?;
        if term.is_empty() {
            return Ok(Vec::new());
        }

        let term = if self.config.normalize_queries {
            Cow::Owned(normalize(term))
        } else {
            Cow::Borrowed(term)
        };

        Ok(state
            .trie
            .find_by_prefix(&term, self.config.max_results)
            .into_iter()
            .cloned()
            .collect())
    }

    /// Number of distinct keys in the index. Zero before the build.
    pub fn size(&self) -> usize {
        self.state.read().trie.len()
    }

    /// Returns `true` once the initial build has completed.
    pub fn is_ready(&self) -> bool {
        self.state.read().ready
    }

    /// The mode chosen at construction.
    pub fn mode(&self) -> &IndexMode {
        &self.mode
    }

    /// The configuration this index runs with.
    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Subscribes to readiness changes.
    pub fn subscribe_ready(&self) -> watch::Receiver<ReadyState> {
        self.ready_tx.subscribe()
    }

    /// Waits until the initial build has finished.
    ///
    /// Resolves immediately if it already has. Returns the build error if the
    /// pass failed. Never resolves if `build` is never called.
    pub async fn wait_until_ready(&self) -> IndexResult<()> {
        let mut rx = self.subscribe_ready();
        loop {
            let state = rx.borrow_and_update().clone();
            match state {
                ReadyState::Ready => return Ok(()),
                ReadyState::Failed(e) => return Err(e),
                ReadyState::Pending => {
                    // The sender lives as long as `self`.
                    if rx.changed().await.is_err() {
                        return Err(IndexError::NotInitialized);
                    }
                }
            }
        }
    }
}
