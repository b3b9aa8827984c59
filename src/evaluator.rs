//! Verdict logic for a single test case.
//!
//! Knows nothing about threads, channels, or timeouts: given the outcome of
//! one invocation and the expected value, it produces a [`TestResult`].
//!
//! Equality is a deliberate two-step fallback, pinned down by the tests
//! below rather than a fuzzy deep-equals:
//! 1. structural: canonical JSON serialization of both sides matches;
//! 2. string form: JavaScript `String(x)` of both sides matches (covers an
//!    expected value stored as a display-equivalent type, e.g. 6 vs "6").

use boa_engine::{Context, JsError, JsResult, JsValue};
use serde_json::Value;

use crate::types::TestResult;

/// Prefix distinguishing a runtime failure from legitimate output.
pub(crate) const RUNTIME_ERROR_PREFIX: &str = "Runtime Error";

/// Build the verdict for one test case from the invocation outcome.
///
/// A thrown error (from the call itself, or from a throwing `toString`
/// during comparison) yields a failed result with a `Runtime Error:` actual;
/// it never propagates to the rest of the run.
pub(crate) fn evaluate_case(
    test_case: u32,
    input: &str,
    expected: &Value,
    invocation: JsResult<JsValue>,
    context: &mut Context,
) -> TestResult {
    let outcome = invocation.and_then(|result| judge(&result, expected, context));

    match outcome {
        Ok(judgement) => TestResult {
            test_case,
            input: input.to_owned(),
            expected: judgement.expected,
            actual: judgement.actual,
            passed: judgement.passed,
        },
        Err(err) => runtime_failure(test_case, input, expected, &err, context),
    }
}

struct Judgement {
    expected: String,
    actual: String,
    passed: bool,
}

fn judge(result: &JsValue, expected: &Value, context: &mut Context) -> JsResult<Judgement> {
    // Step 1: structural equality via canonical JSON. `to_json` must not see
    // `undefined` (boa 0.20 panics on it rather than returning Err); treat it
    // as having no JSON form, like other non-serializable values.
    let actual_json = if result.is_undefined() {
        None
    } else {
        result.to_json(context).ok()
    };
    let structural = actual_json
        .as_ref()
        .map(|actual| canonical(actual) == canonical(expected))
        .unwrap_or(false);

    // Step 2: plain string-form equality, with JavaScript ToString semantics
    // on both sides ([1,2] -> "1,2", 6 -> "6").
    let expected_js = JsValue::from_json(expected, context)?;
    let actual_str = result.to_string(context)?.to_std_string_escaped();
    let expected_str = expected_js.to_string(context)?.to_std_string_escaped();
    let string_form = actual_str == expected_str;

    Ok(Judgement {
        expected: display_value(expected, &expected_str),
        actual: match actual_json.as_ref() {
            Some(json @ (Value::Array(_) | Value::Object(_))) => canonical(json),
            _ => actual_str,
        },
        passed: structural || string_form,
    })
}

fn runtime_failure(
    test_case: u32,
    input: &str,
    expected: &Value,
    err: &JsError,
    context: &mut Context,
) -> TestResult {
    let expected_str = js_string_of(expected, context);
    TestResult {
        test_case,
        input: input.to_owned(),
        expected: expected_str,
        actual: format!("{RUNTIME_ERROR_PREFIX}: {err}"),
        passed: false,
    }
}

fn canonical(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_default()
}

/// Display string for an expected value: compact JSON for structured types,
/// JavaScript string form for scalars.
fn display_value(expected: &Value, expected_str: &str) -> String {
    match expected {
        Value::Array(_) | Value::Object(_) => canonical(expected),
        _ => expected_str.to_owned(),
    }
}

/// JavaScript `String(x)` of a JSON value, falling back to JSON text.
fn js_string_of(value: &Value, context: &mut Context) -> String {
    JsValue::from_json(value, context)
        .and_then(|v| v.to_string(context))
        .map(|s| s.to_std_string_escaped())
        .unwrap_or_else(|_| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use boa_engine::Source;
    use serde_json::json;

    fn eval(context: &mut Context, code: &str) -> JsResult<JsValue> {
        context.eval(Source::from_bytes(code))
    }

    #[test]
    fn structural_equality_on_arrays() {
        let mut context = Context::default();
        let result = eval(&mut context, "[0, 1]");
        let verdict = evaluate_case(1, "[2,7,11,15], 9", &json!([0, 1]), result, &mut context);

        assert!(verdict.passed);
        assert_eq!(verdict.expected, "[0,1]");
        assert_eq!(verdict.actual, "[0,1]");
    }

    #[test]
    fn string_form_fallback_number_vs_string() {
        // Expected stored as the number 6, actual returned as the string "6".
        let mut context = Context::default();
        let result = eval(&mut context, "\"6\"");
        let verdict = evaluate_case(1, "3, 3", &json!(6), result, &mut context);

        assert!(verdict.passed);
        assert_eq!(verdict.expected, "6");
        assert_eq!(verdict.actual, "6");
    }

    #[test]
    fn mismatch_fails_both_steps() {
        let mut context = Context::default();
        let result = eval(&mut context, "[1, 2]");
        let verdict = evaluate_case(1, "input", &json!([2, 1]), result, &mut context);

        assert!(!verdict.passed);
        assert_eq!(verdict.expected, "[2,1]");
        assert_eq!(verdict.actual, "[1,2]");
    }

    #[test]
    fn scalar_expected_renders_without_quotes() {
        let mut context = Context::default();
        let result = eval(&mut context, "\"cab\"");
        let verdict = evaluate_case(1, "\"abc\"", &json!("bca"), result, &mut context);

        assert!(!verdict.passed);
        assert_eq!(verdict.expected, "bca");
        assert_eq!(verdict.actual, "cab");
    }

    #[test]
    fn object_result_renders_as_json() {
        let mut context = Context::default();
        let result = eval(&mut context, "({ a: 1 })");
        let verdict = evaluate_case(1, "input", &json!({ "a": 1 }), result, &mut context);

        assert!(verdict.passed);
        assert_eq!(verdict.actual, "{\"a\":1}");
    }

    #[test]
    fn thrown_error_becomes_runtime_failure() {
        let mut context = Context::default();
        let result = eval(&mut context, "(function () { throw new Error(\"boom\"); })()");
        let verdict = evaluate_case(2, "input", &json!([0, 1]), result, &mut context);

        assert!(!verdict.passed);
        assert!(verdict.actual.starts_with(RUNTIME_ERROR_PREFIX));
        assert!(verdict.actual.contains("boom"));
        // Error path renders the expected value in string form.
        assert_eq!(verdict.expected, "0,1");
    }

    #[test]
    fn undefined_result_fails_against_defined_expected() {
        let mut context = Context::default();
        let result = eval(&mut context, "undefined");
        let verdict = evaluate_case(1, "input", &json!(1), result, &mut context);

        assert!(!verdict.passed);
        assert_eq!(verdict.actual, "undefined");
    }
}
