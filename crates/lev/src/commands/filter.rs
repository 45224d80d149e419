//! Filter command implementation.
//!
//! Reads JSON records and prints the ones that satisfy an expression. The
//! expression is parsed once; every record gets its own variable store.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use logical_eval::Evaluator;
use serde_json::{Map, Value as Json};

use super::{CommandContext, Outcome, Result};
use crate::records;

/// Options for the filter command.
#[derive(Debug, Default)]
pub struct FilterOptions {
    /// Expression each record must satisfy.
    pub expression: String,
    /// Input file; stdin when `None`.
    pub input: Option<PathBuf>,
}

/// Executes the filter command.
pub fn execute(ctx: &CommandContext, opts: &FilterOptions) -> Result<Outcome> {
    // Reject a bad expression before blocking on stdin.
    let expr = logical_eval::parse_with(&opts.expression, &ctx.eval_options)?;

    let content = match &opts.input {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut buf = String::new();
            io::stdin().read_to_string(&mut buf)?;
            buf
        }
    };

    let records = records::parse_records(&content)?;
    let total = records.len();
    let matched = select(&expr, records)?;

    tracing::info!(total, matched = matched.len(), "filtered records");
    if ctx.verbose && !ctx.json_output {
        eprintln!("{} of {} records matched", matched.len(), total);
    }

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&matched)?);
    } else {
        for record in &matched {
            println!("{}", serde_json::to_string(record)?);
        }
    }

    Ok(Outcome::Success)
}

/// Keeps the records for which `expr` is true, in input order.
fn select(
    expr: &logical_eval::Expr,
    records: Vec<Map<String, Json>>,
) -> Result<Vec<Map<String, Json>>> {
    let mut matched = Vec::new();
    for record in records {
        let store = records::flatten_record(&record);
        if Evaluator::new(&store).evaluate(expr)? {
            matched.push(record);
        }
    }
    Ok(matched)
}
