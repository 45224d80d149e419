//! Comparison operator semantics.
//!
//! Every operator yields `false` when the left variable is undefined.
//! Equality and ordering are loose: two operands that both look numeric are
//! compared as numbers, anything else is compared by string form, byte-wise.
//! Two integers are compared exactly, without going through `f64`.

use std::cmp::Ordering;

use regex::Regex;

use super::ast::Operator;
use super::error::{EvalError, EvalResult};
use crate::value::{parse_integer, parse_number, Scalar, Value};

/// Applies `operator` to the left variable's value and the resolved right side.
///
/// `left` is `None` when the variable is undefined. `right` is the literal
/// text or the string form of the right-hand variable.
///
/// # Errors
///
/// Returns [`EvalError::InvalidPattern`] when `operator` is `~`, the left
/// variable is defined and `right` does not compile as a regular expression.
pub fn compare(operator: Operator, left: Option<&Value>, right: &str) -> EvalResult<bool> {
    let Some(left) = left else {
        return Ok(false);
    };

    let scalar = match left {
        Value::Scalar(scalar) => scalar,
        Value::Sequence(items) => return Ok(compare_sequence(operator, items, right)),
    };

    let result = match operator {
        Operator::Equal => loose_eq(scalar, right),
        Operator::NotEqual => !loose_eq(scalar, right),
        Operator::Greater => loose_cmp(scalar, right) == Ordering::Greater,
        Operator::GreaterOrEqual => loose_cmp(scalar, right) != Ordering::Less,
        Operator::Less => loose_cmp(scalar, right) == Ordering::Less,
        Operator::LessOrEqual => loose_cmp(scalar, right) != Ordering::Greater,
        Operator::Matches => {
            let regex = Regex::new(right).map_err(|e| EvalError::invalid_pattern(right, e))?;
            regex.is_match(&scalar.to_string())
        }
        Operator::Contains => scalar.to_string().contains(right),
        Operator::NotContains => !scalar.to_string().contains(right),
    };
    Ok(result)
}

/// Sequences only support membership: `=` is "is a member", `!=` is "is not".
fn compare_sequence(operator: Operator, items: &[Scalar], right: &str) -> bool {
    match operator {
        Operator::Equal => items.iter().any(|item| loose_eq(item, right)),
        Operator::NotEqual => !items.iter().any(|item| loose_eq(item, right)),
        _ => false,
    }
}

/// Loose equality between a scalar and right-hand text.
pub fn loose_eq(left: &Scalar, right: &str) -> bool {
    loose_cmp(left, right) == Ordering::Equal
}

/// Loose ordering between a scalar and right-hand text.
pub fn loose_cmp(left: &Scalar, right: &str) -> Ordering {
    if let (Some(l), Some(r)) = (left.as_integer(), parse_integer(right)) {
        return l.cmp(&r);
    }
    if let (Some(l), Some(r)) = (left.as_number(), parse_number(right)) {
        // both finite, so partial_cmp always succeeds
        return l.partial_cmp(&r).unwrap_or(Ordering::Equal);
    }
    left.to_string().as_str().cmp(right)
}
