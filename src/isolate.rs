//! The isolated execution context: a dedicated worker thread running a fresh
//! boa context per run message.
//!
//! boa contexts are `!Send`, so all JavaScript evaluation lives on this
//! thread; the engine talks to it purely by message passing. The isolate
//! caches nothing between runs — source may change between messages, so the
//! callable is rebuilt every time.

use std::sync::mpsc;
use std::thread;

use boa_engine::vm::RuntimeLimits;
use boa_engine::{Context, JsValue, Source};
use tokio::sync::oneshot;
use tracing::{debug, warn};

use crate::config::SandboxConfig;
use crate::evaluator;
use crate::resolver::{self, ResolvedCall};
use crate::types::{ExecutionReport, TestCase};

pub(crate) struct RunMessage {
    pub source_code: String,
    pub test_cases: Vec<TestCase>,
    pub reply: oneshot::Sender<ExecutionReport>,
}

/// Handle to the worker thread. Dropping it closes the job channel; the
/// thread exits after finishing whatever it is currently running (bounded by
/// the configured runtime limits).
pub(crate) struct Isolate {
    sender: mpsc::Sender<RunMessage>,
}

impl Isolate {
    pub fn spawn(config: SandboxConfig) -> std::io::Result<Self> {
        let (sender, receiver) = mpsc::channel::<RunMessage>();
        thread::Builder::new()
            .name("sandbox-isolate".to_owned())
            .spawn(move || worker_loop(receiver, config))?;
        Ok(Self { sender })
    }

    pub fn send(&self, message: RunMessage) -> Result<(), mpsc::SendError<RunMessage>> {
        self.sender.send(message)
    }
}

fn worker_loop(receiver: mpsc::Receiver<RunMessage>, config: SandboxConfig) {
    while let Ok(message) = receiver.recv() {
        let report = execute_run(&message.source_code, &message.test_cases, &config);
        if message.reply.send(report).is_err() {
            // The engine stopped waiting (timeout teardown). This handle is
            // orphaned, so stop accepting work.
            debug!("isolate reply channel closed; worker exiting");
            return;
        }
    }
}

/// Run every test case of one message against a fresh context.
fn execute_run(source: &str, test_cases: &[TestCase], config: &SandboxConfig) -> ExecutionReport {
    let mut context = Context::default();
    let mut limits = RuntimeLimits::default();
    limits.set_loop_iteration_limit(config.loop_iteration_limit);
    limits.set_recursion_limit(config.recursion_limit);
    limits.set_stack_size_limit(config.stack_size_limit);
    context.set_runtime_limits(limits);

    let function_name = resolver::detect_function_name(source);

    // Evaluate the user source, then look the detected identifier up in the
    // same script so lexical declarations (const/let) are visible. Any
    // failure here is a compilation failure: no test cases are attempted.
    let lookup = format!(
        "{source}\n;(function () {{\n  \
         if (typeof {function_name} === \"function\") {{ return {function_name}; }}\n  \
         throw new Error(\"Could not find function '{function_name}' in code.\");\n}})()"
    );

    let fetched = match context.eval(Source::from_bytes(&lookup)) {
        Ok(value) => value,
        Err(err) => {
            warn!(function_name, error = %err, "source evaluation failed");
            return ExecutionReport::failed(err.to_string());
        }
    };
    let Some(function) = fetched.as_callable() else {
        // The lookup returned a non-callable; should be unreachable given the
        // typeof guard, but never trust evaluated code.
        return ExecutionReport::failed(format!(
            "Could not find function '{function_name}' in code."
        ));
    };

    let mut results = Vec::with_capacity(test_cases.len());
    for (index, case) in test_cases.iter().enumerate() {
        let number = index as u32 + 1;
        let call = ResolvedCall::new(function_name, &case.input);
        debug!(test = number, args = call.args.len(), "invoking test case");

        let invocation = convert_args(&call, &mut context)
            .and_then(|args| function.call(&JsValue::undefined(), &args, &mut context));

        results.push(evaluator::evaluate_case(
            number,
            &case.input,
            &case.output,
            invocation,
            &mut context,
        ));
    }

    ExecutionReport::completed(results)
}

fn convert_args(
    call: &ResolvedCall,
    context: &mut Context,
) -> boa_engine::JsResult<Vec<JsValue>> {
    call.args
        .iter()
        .map(|arg| JsValue::from_json(arg, context))
        .collect()
}
