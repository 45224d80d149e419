//! Check command implementation.
//!
//! Parses an expression and prints its canonical form and the variables it
//! reads, without evaluating anything.

use super::{CommandContext, Outcome, Result};
use crate::output::format_variables;

/// Executes the check command.
pub fn execute(ctx: &CommandContext, expression: &str) -> Result<Outcome> {
    let expr = logical_eval::parse_with(expression, &ctx.eval_options)?;
    let canonical = expr.to_string();
    let variables = expr.variables();

    if ctx.json_output {
        let output = serde_json::json!({
            "valid": true,
            "expression": expression,
            "canonical": canonical,
            "variables": variables,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if !ctx.quiet {
        println!("{canonical}");
        println!("{}", format_variables(&variables, ctx.use_colors));
    }

    Ok(Outcome::Success)
}
