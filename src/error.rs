use thiserror::Error;

/// Failures surfaced by [`SandboxEngine::run`](crate::SandboxEngine::run).
///
/// Per-test-case failures (runtime errors, unparseable inputs) never appear
/// here; they degrade to failed entries inside the report, and compilation
/// failures come back as a failed [`crate::ExecutionReport`] because the
/// isolate itself produced that answer.
#[derive(Debug, Error)]
pub enum SandboxError {
    /// The whole run exceeded its wall-clock deadline. The isolate has been
    /// discarded and will be replaced on the next run.
    #[error("execution timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Source code exceeds the configured maximum size.
    #[error("source code exceeds maximum size of {max} bytes (got {actual})")]
    CodeTooLarge { max: usize, actual: usize },

    /// A test case input exceeds the configured maximum size.
    #[error("test input exceeds maximum size of {max} bytes (got {actual})")]
    InputTooLarge { max: usize, actual: usize },

    /// The isolate worker thread died or dropped its channel mid-run.
    #[error("isolate worker terminated unexpectedly")]
    IsolateGone,

    /// The isolate worker thread could not be spawned.
    #[error("failed to spawn isolate thread: {0}")]
    Spawn(#[from] std::io::Error),
}
