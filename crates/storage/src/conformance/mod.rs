//! Conformance test suite for `KeyValueStore` implementations.
//!
//! A backend-agnostic suite any store can run to verify it behaves the way
//! the repositories expect:
//!
//! - **Read**: unwritten keys are absent, typed reads fall back to defaults
//! - **Write**: last write wins, keys are independent, documents round-trip
//!   without reordering
//!
//! # Usage
//!
//! ```ignore
//! use contractor_storage::conformance::run_conformance_suite;
//!
//! #[test]
//! fn memory_conformance() {
//!     let report = run_conformance_suite(MemoryStore::new);
//!     assert!(report.failed == 0, "{report}");
//! }
//! ```

mod read;
mod write;

use std::fmt;

use crate::KeyValueStore;

/// Result of a single conformance test.
#[derive(Debug, Clone)]
pub struct TestResult {
    /// Test category (e.g. "read", "write").
    pub category: String,
    /// Test name (e.g. "unwritten_key_is_absent").
    pub name: String,
    pub passed: bool,
    /// Error message if the test failed.
    pub message: Option<String>,
}

impl TestResult {
    fn from_result(category: &str, name: &str, result: Result<(), String>) -> Self {
        let (passed, message) = match result {
            Ok(()) => (true, None),
            Err(msg) => (false, Some(msg)),
        };
        Self {
            category: category.to_string(),
            name: name.to_string(),
            passed,
            message,
        }
    }
}

/// Aggregated report from a full conformance suite run.
#[derive(Debug, Clone)]
pub struct ConformanceReport {
    pub results: Vec<TestResult>,
    pub passed: usize,
    pub failed: usize,
    pub total: usize,
}

impl fmt::Display for ConformanceReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Conformance: {}/{} passed ({} failed)",
            self.passed, self.total, self.failed
        )?;
        for r in &self.results {
            if !r.passed {
                writeln!(
                    f,
                    "  FAIL [{}/{}]: {}",
                    r.category,
                    r.name,
                    r.message.as_deref().unwrap_or("(no message)")
                )?;
            }
        }
        Ok(())
    }
}

/// Run the full conformance suite against a store backend.
///
/// `factory` is called once per test and must return a fresh, empty store.
pub fn run_conformance_suite<S, F>(factory: F) -> ConformanceReport
where
    S: KeyValueStore,
    F: Fn() -> S,
{
    let mut results = Vec::new();

    results.extend(read::run_read_tests(&factory));
    results.extend(write::run_write_tests(&factory));

    let passed = results.iter().filter(|r| r.passed).count();
    let total = results.len();

    ConformanceReport {
        results,
        passed,
        failed: total - passed,
        total,
    }
}

/// Turn a storage error into a test failure message.
fn step<T>(what: &str, r: Result<T, crate::StorageError>) -> Result<T, String> {
    r.map_err(|e| format!("{what} failed: {e}"))
}
