//! Boundary types for one sandbox run.
//!
//! Report types serialize in camelCase because the consuming web client reads
//! the worker message shape directly (`testResults` / `allPassed`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One run of the user's current source against a question's test cases.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunRequest {
    pub source_code: String,
    pub test_cases: Vec<TestCase>,
}

/// A single test case from the question bank.
///
/// `input` is informally formatted example text (e.g.
/// `"nums = [2,7,11,15], target = 9"`), not a strict serialization.
/// `output` is the expected return value as JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestCase {
    pub input: String,
    pub output: Value,
}

/// Verdict for one test case, in test-case order.
///
/// `expected` and `actual` are display strings: compact JSON for arrays and
/// objects, the JavaScript string form for scalars.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestResult {
    /// 1-based test case number.
    pub test_case: u32,
    pub input: String,
    pub expected: String,
    pub actual: String,
    pub passed: bool,
}

/// Terminal output of one run.
///
/// Two shapes, enforced by the constructors: a completed run carries one
/// result per test case and no `error`; a failed run (compilation failure,
/// missing function) carries an `error` message, no results, and
/// `all_passed == false`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionReport {
    pub test_results: Vec<TestResult>,
    pub all_passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExecutionReport {
    /// Report for a run where every test case was attempted.
    ///
    /// Zero test cases is not a vacuous pass: `all_passed` requires at least
    /// one result.
    pub fn completed(test_results: Vec<TestResult>) -> Self {
        let all_passed = !test_results.is_empty() && test_results.iter().all(|r| r.passed);
        Self {
            test_results,
            all_passed,
            error: None,
        }
    }

    /// Report for a run that never got as far as invoking test cases.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            test_results: Vec::new(),
            all_passed: false,
            error: Some(error.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }
}
