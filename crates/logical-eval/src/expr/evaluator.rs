//! Expression evaluation against a variable store.
//!
//! This module provides the [`Evaluator`], which walks a parsed [`Expr`] and
//! folds it into a single boolean.
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use logical_eval::{Evaluator, ExprParser, Value};
//!
//! let expr = ExprParser::parse(r#"role = "admin" or age > "65""#).unwrap();
//!
//! let mut vars = HashMap::new();
//! vars.insert("role".to_string(), Value::from("user"));
//! vars.insert("age".to_string(), Value::from(70_i64));
//!
//! let evaluator = Evaluator::new(&vars);
//! assert!(evaluator.evaluate(&expr).unwrap());
//! ```

use std::borrow::Cow;

use super::ast::{Comparison, Expr, Operand};
use super::compare::compare;
use super::error::EvalResult;
use crate::value::VariableStore;

/// Stand-in for an undefined variable on the right-hand side of a comparison.
pub const UNDEFINED: &str = "undefined";

/// Evaluates parsed expressions against a variable store.
///
/// Both sides of every AND / OR are always evaluated, so an error on the
/// right-hand side (such as an invalid `~` pattern) surfaces even when the
/// left-hand side already decides the result.
#[derive(Debug)]
pub struct Evaluator<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: VariableStore + ?Sized> Evaluator<'a, S> {
    /// Creates an evaluator over `store`.
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Evaluates `expr` to a boolean.
    ///
    /// # Errors
    ///
    /// Returns [`EvalError::InvalidPattern`](super::EvalError::InvalidPattern)
    /// when a `~` pattern does not compile.
    pub fn evaluate(&self, expr: &Expr) -> EvalResult<bool> {
        match expr {
            Expr::Comparison(comparison) => self.evaluate_comparison(comparison),
            Expr::And(left, right) => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                Ok(left && right)
            }
            Expr::Or(left, right) => {
                let left = self.evaluate(left)?;
                let right = self.evaluate(right)?;
                Ok(left || right)
            }
        }
    }

    fn evaluate_comparison(&self, comparison: &Comparison) -> EvalResult<bool> {
        let right = self.resolve(&comparison.rhs);
        let left = self.store.lookup(&comparison.variable);
        let result = compare(comparison.operator, left, &right)?;

        tracing::trace!(
            variable = %comparison.variable,
            operator = %comparison.operator,
            defined = left.is_some(),
            result,
            "comparison"
        );
        Ok(result)
    }

    /// Resolves the right-hand side to text.
    fn resolve<'b>(&self, operand: &'b Operand) -> Cow<'b, str> {
        match operand {
            Operand::Literal(value) => Cow::Borrowed(value),
            Operand::Variable(name) => match self.store.lookup(name) {
                Some(value) => Cow::Owned(value.to_display_string()),
                None => Cow::Borrowed(UNDEFINED),
            },
        }
    }
}
