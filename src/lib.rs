//! In-process sandbox for running user-submitted interview solutions.
//!
//! Given free-form JavaScript source and a question's test cases, the
//! sandbox detects the primary function, parses loosely-formatted test case
//! inputs into argument lists, invokes the function once per test case on an
//! isolated worker thread under a wall-clock deadline, and reports per-case
//! pass/fail verdicts.
//!
//! ```no_run
//! use prepmate_sandbox::{RunRequest, SandboxEngine, TestCase};
//! use serde_json::json;
//!
//! # async fn demo() -> Result<(), prepmate_sandbox::SandboxError> {
//! let mut engine = SandboxEngine::default();
//! let report = engine
//!     .run(RunRequest {
//!         source_code: "function twoSum(nums, target) { return [0, 1]; }".into(),
//!         test_cases: vec![TestCase {
//!             input: "nums = [2,7,11,15], target = 9".into(),
//!             output: json!([0, 1]),
//!         }],
//!     })
//!     .await?;
//! assert!(report.all_passed);
//! # Ok(())
//! # }
//! ```
//!
//! The sandbox isolates against accidental infinite loops and runtime errors,
//! not against a deliberate escape attempt; it is a practice-tool harness,
//! not a security boundary.

pub mod config;
pub mod engine;
mod evaluator;
mod isolate;
pub mod resolver;
pub mod types;

mod error;

pub use config::SandboxConfig;
pub use engine::SandboxEngine;
pub use error::SandboxError;
pub use types::{ExecutionReport, RunRequest, TestCase, TestResult};
