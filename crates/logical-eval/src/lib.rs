//! Boolean filter expressions evaluated against named variables.
//!
//! This crate answers "does this record match this filter?" for a small
//! textual language of comparisons joined by `AND` / `OR`. The host supplies
//! the variable values; nothing is read from or written to any store.
//!
//! ```
//! use std::collections::HashMap;
//! use logical_eval::{evaluate, Value};
//!
//! let mut vars = HashMap::new();
//! vars.insert("user.age".to_string(), Value::from("42"));
//! vars.insert("tags".to_string(), Value::from(vec!["red", "green"]));
//!
//! assert!(evaluate(r#"user.age >= "18" and tags = 'green'"#, &vars).unwrap());
//! assert!(!evaluate(r#"missing = "x""#, &vars).unwrap());
//! ```

pub mod expr;
pub mod value;

pub use expr::{
    evaluate, evaluate_with, parse, parse_with, usage, Comparison, ErrorKind, EvalError,
    EvalOptions, EvalResult, Evaluator, Expr, ExprParser, Operand, Operator, DEFAULT_MAX_DEPTH,
};
pub use value::{Scalar, Value, VariableStore};
