//! Signature & argument resolution.
//!
//! Question authors write starter code and test-case inputs as human-readable
//! example text, not a formal serialization. This module turns that text into
//! a callable name and a concrete argument list, tolerating both machine-clean
//! JSON-like inputs and decorated pseudo-code like
//! `"nums = [2,7,11,15], target = 9"`.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

/// Identifier used when no function definition can be detected.
pub const DEFAULT_FUNCTION_NAME: &str = "solution";

// The two authoring conventions in use: `function twoSum(...)` and
// `const twoSum = (...)` / `= async ...` / `= function ...`. Do not
// generalize beyond these unless question authoring changes.
static NAMED_FUNCTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"function\s+([A-Za-z_$][A-Za-z0-9_$]*)").unwrap());

static CONST_CALLABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"const\s+([A-Za-z_$][A-Za-z0-9_$]*)\s*=\s*(\(|async|function)").unwrap()
});

// Example-style variable annotations (`nums =` / `target:`) that are not
// valid literal syntax.
static ANNOTATION_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w+)\s*[=:]\s*").unwrap());

/// A callable name plus the concrete arguments for one test case.
/// Ephemeral; discarded after the call is made.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedCall {
    pub function_name: String,
    pub args: Vec<Value>,
}

impl ResolvedCall {
    /// Resolve one test case input against an already-detected function name.
    pub fn new(function_name: &str, input: &str) -> Self {
        Self {
            function_name: function_name.to_owned(),
            args: parse_arguments(input),
        }
    }

    /// Resolve a test case input, detecting the function name from source.
    pub fn resolve(source: &str, input: &str) -> Self {
        Self::new(detect_function_name(source), input)
    }
}

/// Detect the name of the primary function in `source`.
///
/// A named-function declaration anywhere in the source wins over a
/// const-assigned callable; falls back to [`DEFAULT_FUNCTION_NAME`].
pub fn detect_function_name(source: &str) -> &str {
    NAMED_FUNCTION_RE
        .captures(source)
        .or_else(|| CONST_CALLABLE_RE.captures(source))
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str())
        .unwrap_or(DEFAULT_FUNCTION_NAME)
}

/// Parse a test case input string into an ordered argument list.
///
/// Strips `name =` / `name:` annotations, then decodes the remainder as a
/// JSON array. When that fails, falls back to splitting on top-level commas
/// and coercing each piece (numeric text to a number, anything else to a
/// string with surrounding quotes removed). An unparseable input resolves to
/// an empty argument list so the call fails naturally instead of aborting
/// the run.
pub fn parse_arguments(input: &str) -> Vec<Value> {
    let cleaned = ANNOTATION_RE.replace_all(input, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Vec::new();
    }

    if let Ok(args) = serde_json::from_str::<Vec<Value>>(&format!("[{cleaned}]")) {
        return args;
    }

    split_top_level(cleaned)
        .into_iter()
        .map(coerce_scalar)
        .collect()
}

/// Split on commas at bracket depth zero, honoring quoted strings.
fn split_top_level(text: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (i, ch) in text.char_indices() {
        match quote {
            Some(q) => {
                if ch == q {
                    quote = None;
                }
            }
            None => match ch {
                '\'' | '"' => quote = Some(ch),
                '[' | '{' | '(' => depth += 1,
                ']' | '}' | ')' => depth = depth.saturating_sub(1),
                ',' if depth == 0 => {
                    pieces.push(&text[start..i]);
                    start = i + 1;
                }
                _ => {}
            },
        }
    }
    pieces.push(&text[start..]);
    pieces
}

fn coerce_scalar(piece: &str) -> Value {
    let trimmed = piece.trim();
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(float) = trimmed.parse::<f64>() {
        if let Some(number) = serde_json::Number::from_f64(float) {
            return Value::Number(number);
        }
    }
    Value::String(trimmed.replace(['\'', '"'], ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn detects_named_function() {
        assert_eq!(
            detect_function_name("function twoSum(nums, target) { return []; }"),
            "twoSum"
        );
    }

    #[test]
    fn detects_const_arrow() {
        assert_eq!(
            detect_function_name("const addTwo = (a, b) => a + b;"),
            "addTwo"
        );
    }

    #[test]
    fn detects_const_async() {
        assert_eq!(
            detect_function_name("const fetchAll = async (urls) => urls;"),
            "fetchAll"
        );
    }

    #[test]
    fn detects_const_function_expression() {
        assert_eq!(
            detect_function_name("const reverse = function (s) { return s; };"),
            "reverse"
        );
    }

    #[test]
    fn named_function_wins_over_const() {
        let source = "const helper = (x) => x;\nfunction main(a) { return helper(a); }";
        assert_eq!(detect_function_name(source), "main");
    }

    #[test]
    fn falls_back_to_solution() {
        assert_eq!(detect_function_name("let x = 1;"), DEFAULT_FUNCTION_NAME);
        assert_eq!(detect_function_name(""), DEFAULT_FUNCTION_NAME);
    }

    #[test]
    fn parses_plain_json_arguments() {
        assert_eq!(
            parse_arguments("[2,7,11,15], 9"),
            vec![json!([2, 7, 11, 15]), json!(9)]
        );
    }

    #[test]
    fn strips_variable_annotations() {
        assert_eq!(
            parse_arguments("nums = [3,2,4], target = 6"),
            vec![json!([3, 2, 4]), json!(6)]
        );
    }

    #[test]
    fn annotated_and_plain_forms_resolve_identically() {
        assert_eq!(
            parse_arguments("nums = [2,7,11,15], target = 9"),
            parse_arguments("[2,7,11,15], 9")
        );
    }

    #[test]
    fn strips_colon_annotations() {
        assert_eq!(parse_arguments("n: 5, k: 2"), vec![json!(5), json!(2)]);
    }

    #[test]
    fn parses_nested_structures() {
        assert_eq!(
            parse_arguments("[[1,2],[3,4]], 10"),
            vec![json!([[1, 2], [3, 4]]), json!(10)]
        );
    }

    #[test]
    fn fallback_splits_on_top_level_commas_only() {
        // Single-quoted strings are not valid JSON, forcing the fallback path.
        assert_eq!(
            parse_arguments("'a,b', 3"),
            vec![json!("a,b"), json!(3)]
        );
    }

    #[test]
    fn fallback_coerces_numbers_and_strips_quotes() {
        assert_eq!(
            parse_arguments("'abc', 42, 3.5"),
            vec![json!("abc"), json!(42), json!(3.5)]
        );
    }

    #[test]
    fn fallback_bare_word_becomes_string() {
        assert_eq!(parse_arguments("hello, 1"), vec![json!("hello"), json!(1)]);
    }

    #[test]
    fn empty_input_resolves_to_no_arguments() {
        assert!(parse_arguments("").is_empty());
        assert!(parse_arguments("   ").is_empty());
    }

    #[test]
    fn single_scalar_argument() {
        assert_eq!(parse_arguments("121"), vec![json!(121)]);
        assert_eq!(parse_arguments("\"racecar\""), vec![json!("racecar")]);
    }

    #[test]
    fn resolved_call_carries_detected_name() {
        let call = ResolvedCall::resolve("function maxProfit(prices) {}", "[7,1,5,3,6,4]");
        assert_eq!(call.function_name, "maxProfit");
        assert_eq!(call.args, vec![json!([7, 1, 5, 3, 6, 4])]);
    }
}
