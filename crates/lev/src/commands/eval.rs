//! Eval command implementation.
//!
//! Evaluates one expression against variables from flags and an optional
//! JSON file. The exit status carries the verdict.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use logical_eval::{Scalar, Value};

use super::{CommandContext, Outcome, Result};
use crate::output::format_verdict;
use crate::records;

/// Options for the eval command.
#[derive(Debug, Default)]
pub struct EvalCommandOptions {
    /// Expression to evaluate.
    pub expression: String,
    /// `--var` assignments, in order.
    pub vars: Vec<(String, String)>,
    /// `--list` assignments with comma-separated items.
    pub lists: Vec<(String, String)>,
    /// JSON object file loaded before the flags.
    pub vars_file: Option<PathBuf>,
}

/// Executes the eval command.
pub fn execute(ctx: &CommandContext, opts: &EvalCommandOptions) -> Result<Outcome> {
    let store = build_store(opts)?;
    let result = logical_eval::evaluate_with(&opts.expression, &store, &ctx.eval_options)?;

    if ctx.json_output {
        let output = serde_json::json!({
            "expression": opts.expression,
            "result": result,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("{}", format_verdict(result, ctx.use_colors));
    }

    Ok(if result {
        Outcome::Success
    } else {
        Outcome::NoMatch
    })
}

/// Merges the variables file and flags. Later assignments win.
pub fn build_store(opts: &EvalCommandOptions) -> Result<HashMap<String, Value>> {
    let mut store = match &opts.vars_file {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            records::flatten_record(&records::parse_object(&content)?)
        }
        None => HashMap::new(),
    };

    for (name, value) in &opts.vars {
        store.insert(name.clone(), Value::from(value.as_str()));
    }
    for (name, items) in &opts.lists {
        store.insert(name.clone(), split_list(items));
    }

    tracing::debug!(variables = store.len(), "built variable store");
    Ok(store)
}

/// An empty argument is an empty list, not a list holding one empty string.
fn split_list(items: &str) -> Value {
    if items.is_empty() {
        return Value::Sequence(Vec::new());
    }
    Value::Sequence(items.split(',').map(Scalar::from).collect())
}
