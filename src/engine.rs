//! Run orchestration: owns at most one isolate handle, imposes the run-level
//! deadline, and replaces the isolate (never reuses it) after a timeout
//! teardown.

use std::time::Instant;

use tokio::sync::oneshot;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::SandboxConfig;
use crate::error::SandboxError;
use crate::isolate::{Isolate, RunMessage};
use crate::types::{ExecutionReport, RunRequest};

/// Executes user-submitted solutions against question test cases.
///
/// One execution in flight per engine instance: `run` takes `&mut self`, so
/// callers that want to overlap runs must serialize them or use separate
/// engines. The isolate is created lazily on the first run and survives
/// across runs until a timeout discards it.
pub struct SandboxEngine {
    config: SandboxConfig,
    isolate: Option<Isolate>,
}

impl SandboxEngine {
    pub fn new(config: SandboxConfig) -> Self {
        Self {
            config,
            isolate: None,
        }
    }

    /// Execute one run and await its report under the configured deadline.
    ///
    /// Compilation failures come back as a failed [`ExecutionReport`] (that
    /// is the isolate's answer); `Err` is reserved for the run never
    /// producing an answer at all: guardrail rejections, timeout, or a dead
    /// worker.
    pub async fn run(&mut self, request: RunRequest) -> Result<ExecutionReport, SandboxError> {
        if request.source_code.len() > self.config.max_source_bytes {
            return Err(SandboxError::CodeTooLarge {
                max: self.config.max_source_bytes,
                actual: request.source_code.len(),
            });
        }
        for case in &request.test_cases {
            if case.input.len() > self.config.max_input_bytes {
                return Err(SandboxError::InputTooLarge {
                    max: self.config.max_input_bytes,
                    actual: case.input.len(),
                });
            }
        }

        let run_id = Uuid::new_v4();
        info!(
            %run_id,
            test_cases = request.test_cases.len(),
            source_bytes = request.source_code.len(),
            "starting run"
        );

        if self.isolate.is_none() {
            debug!(%run_id, "spawning fresh isolate");
            self.isolate = Some(Isolate::spawn(self.config.clone())?);
        }

        let (reply_tx, reply_rx) = oneshot::channel();
        let message = RunMessage {
            source_code: request.source_code,
            test_cases: request.test_cases,
            reply: reply_tx,
        };

        let sent = match &self.isolate {
            Some(isolate) => isolate.send(message).is_ok(),
            None => false,
        };
        if !sent {
            warn!(%run_id, "isolate channel closed; discarding handle");
            self.isolate = None;
            return Err(SandboxError::IsolateGone);
        }

        let started = Instant::now();
        match tokio::time::timeout(self.config.timeout, reply_rx).await {
            Ok(Ok(report)) => {
                info!(
                    %run_id,
                    all_passed = report.all_passed,
                    compilation_error = report.is_error(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "run completed"
                );
                Ok(report)
            }
            Ok(Err(_)) => {
                // Worker dropped the reply without answering (panic or crash
                // mid-run). The handle cannot be trusted anymore.
                warn!(%run_id, "isolate died mid-run; discarding handle");
                self.isolate = None;
                Err(SandboxError::IsolateGone)
            }
            Err(_) => {
                let timeout_ms = self.config.timeout.as_millis() as u64;
                warn!(%run_id, timeout_ms, "run timed out; discarding isolate");
                // The orphaned thread winds down on its own once the runtime
                // limits trip; its state is not trusted for reuse either way.
                self.isolate = None;
                Err(SandboxError::Timeout { timeout_ms })
            }
        }
    }

    pub fn config(&self) -> &SandboxConfig {
        &self.config
    }
}

impl Default for SandboxEngine {
    fn default() -> Self {
        Self::new(SandboxConfig::default())
    }
}
