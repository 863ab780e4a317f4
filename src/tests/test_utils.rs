//! Test utilities and fixtures for Prefix Search.
//!
//! Reusable fixtures, proptest strategies and a recording build observer.

use parking_lot::Mutex;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;
use std::path::PathBuf;
use tempfile::TempDir;

use crate::index::{BuildObserver, BuildReport};

/// Generate a strategy for short mixed-case keys.
///
/// The alphabet is small so generated datasets share prefixes and collide
/// after case folding.
pub fn key_strategy(max_length: usize) -> BoxedStrategy<String> {
    let alphabet = vec!['a', 'b', 'A', 'B', 'é', 'É'];
    proptest::collection::vec(prop::sample::select(alphabet), 0..max_length)
        .prop_map(|chars| chars.into_iter().collect::<String>())
        .boxed()
}

/// Test fixture owning a temporary directory for test files.
pub struct TestFixture {
    /// Temporary directory for test files
    pub temp_dir: TempDir,
}

impl TestFixture {
    /// Create a new test fixture.
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            temp_dir: tempfile::tempdir()?,
        })
    }

    /// Create a file with a unique name within the fixture directory.
    ///
    /// The file lives as long as the fixture.
    ///
    /// # Parameters
    ///
    /// * `contents` - The contents to write to the file.
    /// * `extension` - The file extension to use, including the dot.
    pub fn create_file<C: AsRef<[u8]>>(
        &self,
        contents: C,
        extension: &str,
    ) -> std::io::Result<PathBuf> {
        let (_, path) = tempfile::Builder::new()
            .suffix(extension)
            .tempfile_in(&self.temp_dir)?
            .keep()
            .map_err(|e| e.error)?;
        std::fs::write(&path, contents)?;
        Ok(path)
    }
}

/// Build observer that keeps every report it receives.
#[derive(Debug, Default)]
pub struct RecordingObserver {
    reports: Mutex<Vec<BuildReport>>,
}

impl RecordingObserver {
    /// Reports recorded so far.
    pub fn reports(&self) -> Vec<BuildReport> {
        self.reports.lock().clone()
    }
}

impl BuildObserver for RecordingObserver {
    fn record(&self, report: &BuildReport) {
        self.reports.lock().push(report.clone());
    }
}
