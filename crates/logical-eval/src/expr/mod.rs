//! Filter expression scanner, parser and evaluator.
//!
//! An expression is a chain of comparisons joined by `AND` / `OR`, with
//! parentheses for grouping. Each comparison tests one variable against a
//! quoted literal or against another variable.
//!
//! # Supported Syntax
//!
//! ## Comparisons
//! - `=` - Loose equality (membership when the variable is a sequence)
//! - `<>`, `!=` - Loose inequality
//! - `>`, `>=`, `<`, `<=` - Ordering, numeric when both sides look numeric
//! - `~` - Regular expression match anywhere in the value
//! - `^` - Value contains the text
//! - `!^` - Value does not contain the text
//!
//! ## Right-hand side
//! - `"text"` or `'text'` - A literal; `\` escapes the quote and itself
//! - `name` - Another variable; an undefined one reads as `undefined`
//!
//! ## Boolean Operators
//! - `AND`, `OR` - Case-insensitive, equal precedence, chained to the right
//! - `()` - Grouping
//!
//! # Example
//!
//! ```
//! use std::collections::HashMap;
//! use logical_eval::{evaluate, Value};
//!
//! let mut vars = HashMap::new();
//! vars.insert("a".to_string(), Value::from("2"));
//! vars.insert("b".to_string(), Value::from("xyz"));
//!
//! let matched = evaluate(r#"(a = "1" or a = "2") and b ~ "^x""#, &vars).unwrap();
//! assert!(matched);
//! ```

mod ast;
mod compare;
mod error;
mod evaluator;
mod lexer;
mod parser;
mod usage;

pub use ast::{Comparison, Expr, Operand, Operator};
pub use compare::{compare, loose_cmp, loose_eq};
pub use error::{ErrorKind, EvalError, EvalResult};
pub use evaluator::{Evaluator, UNDEFINED};
pub use lexer::{Lexer, Token, TokenKind};
pub use parser::ExprParser;
pub use usage::usage;

use crate::value::VariableStore;

/// Default limit on parenthesis and AND/OR nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options that apply to a single parse or evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvalOptions {
    /// Maximum nesting depth. Every parenthesis level and every AND/OR link
    /// counts as one level.
    pub max_depth: usize,
}

impl Default for EvalOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl EvalOptions {
    /// Returns these options with a different nesting limit.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Parses an expression into a tree without evaluating it.
pub fn parse(expression: &str) -> EvalResult<Expr> {
    ExprParser::parse(expression)
}

/// Parses an expression with the given options.
pub fn parse_with(expression: &str, options: &EvalOptions) -> EvalResult<Expr> {
    ExprParser::parse_with(expression, options)
}

/// Evaluates `expression` against `store` with default options.
///
/// # Errors
///
/// Returns a lexical or syntax error if the expression is malformed, and a
/// pattern error if a `~` pattern does not compile. Undefined variables are
/// not errors; comparisons against them are `false`.
pub fn evaluate<S: VariableStore + ?Sized>(expression: &str, store: &S) -> EvalResult<bool> {
    evaluate_with(expression, store, &EvalOptions::default())
}

/// Evaluates `expression` against `store` with the given options.
pub fn evaluate_with<S: VariableStore + ?Sized>(
    expression: &str,
    store: &S,
    options: &EvalOptions,
) -> EvalResult<bool> {
    tracing::debug!(expression, "evaluating expression");
    let expr = ExprParser::parse_with(expression, options)?;
    let result = Evaluator::new(store).evaluate(&expr)?;
    tracing::debug!(expression, result, "evaluated expression");
    Ok(result)
}
