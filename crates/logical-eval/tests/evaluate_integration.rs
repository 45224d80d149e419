//! Integration tests for the public evaluation API.
//!
//! These tests drive `evaluate` end to end, from expression text through the
//! scanner, parser and evaluator, against maps built the way a host would.

use std::collections::HashMap;

use logical_eval::{evaluate, ErrorKind, EvalError, Value};

fn vars(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
    pairs
        .iter()
        .map(|(name, value)| (name.to_string(), value.clone()))
        .collect()
}

// ============================================================================
// Reference scenarios
// ============================================================================

#[test]
fn test_simple_equality_matches() {
    let store = vars(&[("a", Value::from("1"))]);
    assert_eq!(evaluate(r#"a = "1""#, &store), Ok(true));
}

#[test]
fn test_undefined_variable_does_not_match() {
    let store: HashMap<String, Value> = HashMap::new();
    assert_eq!(evaluate(r#"a = "1""#, &store), Ok(false));
}

#[test]
fn test_grouped_or_with_regex() {
    let store = vars(&[("a", Value::from("2")), ("b", Value::from("xyz"))]);
    assert_eq!(
        evaluate(r#"(a = "1" or a = "2") and b ~ "^x""#, &store),
        Ok(true)
    );
}

#[test]
fn test_contains_and_not_contains() {
    let store = vars(&[("a", Value::from("hello"))]);
    assert_eq!(evaluate(r#"a ^ "ell""#, &store), Ok(true));
    assert_eq!(evaluate(r#"a !^ "ell""#, &store), Ok(false));
}

#[test]
fn test_sequence_membership() {
    let store = vars(&[("a", Value::from(vec!["1", "2", "3"]))]);
    assert_eq!(evaluate(r#"a = "2""#, &store), Ok(true));
    assert_eq!(evaluate(r#"a = "5""#, &store), Ok(false));
}

#[test]
fn test_escaped_quote_in_literal() {
    let store = vars(&[("a", Value::from(r#"va"lue"#))]);
    assert_eq!(evaluate(r#"a = "va\"lue""#, &store), Ok(true));
    assert_eq!(evaluate(r#"a = "value""#, &store), Ok(false));
}

// ============================================================================
// Operators and coercion
// ============================================================================

#[test]
fn test_lone_less_than_works() {
    let store = vars(&[("n", Value::from(5_i64))]);
    assert_eq!(evaluate("n < '10'", &store), Ok(true));
    assert_eq!(evaluate("n<'5'", &store), Ok(false));
    assert_eq!(evaluate("n <= '5'", &store), Ok(true));
    assert_eq!(evaluate("n <> '5'", &store), Ok(false));
}

#[test]
fn test_numeric_vs_string_ordering() {
    let store = vars(&[("n", Value::from("10")), ("s", Value::from("apple"))]);
    // numeric comparison: 10 > 9
    assert_eq!(evaluate("n > '9'", &store), Ok(true));
    // string comparison: "apple" < "banana"
    assert_eq!(evaluate("s < 'banana'", &store), Ok(true));
    // mixed: compared as strings, "10" < "9x"
    assert_eq!(evaluate("n < '9x'", &store), Ok(true));
}

#[test]
fn test_zero_is_not_equal_to_empty() {
    let store = vars(&[("z", Value::from("0"))]);
    assert_eq!(evaluate("z = ''", &store), Ok(false));
    assert_eq!(evaluate("z != ''", &store), Ok(true));
}

#[test]
fn test_numbers_from_json() {
    let store: HashMap<String, Value> =
        serde_json::from_str(r#"{"price": 19.5, "qty": 3, "tags": ["sale", "new"]}"#).unwrap();
    assert_eq!(
        evaluate("price < '20' and qty >= '3' and tags = 'sale'", &store),
        Ok(true)
    );
}

#[test]
fn test_variable_to_variable_with_undefined_sentinel() {
    let store = vars(&[("a", Value::from("undefined"))]);
    assert_eq!(evaluate("a = nothing.here", &store), Ok(true));
    assert_eq!(evaluate("nothing.here = a", &store), Ok(false));
}

// ============================================================================
// Undefined-variable policy
// ============================================================================

#[test]
fn test_every_operator_is_false_for_undefined_left() {
    let store: HashMap<String, Value> = HashMap::new();
    for symbol in ["=", "<>", "!=", ">", ">=", "<", "<=", "~", "^", "!^"] {
        assert_eq!(
            evaluate(&format!("missing {symbol} 'x'"), &store),
            Ok(false),
            "operator {symbol}"
        );
    }
}

// ============================================================================
// Evaluation order
// ============================================================================

#[test]
fn test_right_side_of_false_and_is_still_evaluated() {
    let store = vars(&[("a", Value::from("1")), ("b", Value::from("x"))]);
    let err = evaluate("a = '2' and b ~ '('", &store).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Pattern);
}

#[test]
fn test_right_side_of_true_or_is_still_evaluated() {
    let store = vars(&[("a", Value::from("1")), ("b", Value::from("x"))]);
    let err = evaluate("a = '1' or b ~ '[z-a]'", &store).unwrap_err();
    assert!(matches!(err, EvalError::InvalidPattern { .. }));
}

#[test]
fn test_repeated_evaluation_is_stable() {
    let store = vars(&[("a", Value::from("2")), ("b", Value::from("xyz"))]);
    let expression = "(a = '1' or a = '2') and b ~ '^x'";
    let results: Vec<_> = (0..5).map(|_| evaluate(expression, &store)).collect();
    assert!(results.iter().all(|r| *r == Ok(true)));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_lexical_and_syntax_errors_are_distinguished() {
    let store: HashMap<String, Value> = HashMap::new();
    assert_eq!(
        evaluate("a = '1' | b = '2'", &store).unwrap_err().kind(),
        ErrorKind::Lexical
    );
    assert_eq!(
        evaluate("a = '1' b = '2'", &store).unwrap_err().kind(),
        ErrorKind::Syntax
    );
    assert_eq!(
        evaluate("a == '1'", &store).unwrap_err().kind(),
        ErrorKind::Lexical
    );
}
