use std::time::Duration;

/// Limits applied to every run.
///
/// The timeout is the primary defense against runaway user code; the boa
/// runtime limits are a backstop that bounds an orphaned worker thread after
/// a timeout teardown, since the thread itself cannot be interrupted.
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    /// Wall-clock deadline for one whole run (all test cases).
    pub timeout: Duration,
    /// Maximum size of user source code in bytes.
    pub max_source_bytes: usize,
    /// Maximum size of a single test case input in bytes.
    pub max_input_bytes: usize,
    /// Loop iteration cap inside the isolate.
    pub loop_iteration_limit: u64,
    /// Recursion depth cap inside the isolate.
    pub recursion_limit: usize,
    /// Interpreter stack size cap inside the isolate, in bytes.
    pub stack_size_limit: usize,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(5),
            max_source_bytes: 1024 * 1024,       // 1MB
            max_input_bytes: 64 * 1024,          // 64KB
            loop_iteration_limit: 100_000_000,
            recursion_limit: 1_000,
            stack_size_limit: 512 * 1024,
        }
    }
}
