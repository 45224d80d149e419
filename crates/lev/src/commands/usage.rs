//! Usage command implementation.

use super::{CommandContext, Outcome, Result};

/// Prints the description of the expression language.
pub fn execute(ctx: &CommandContext) -> Result<Outcome> {
    if ctx.json_output {
        let output = serde_json::json!({ "usage": logical_eval::usage() });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", logical_eval::usage());
    }
    Ok(Outcome::Success)
}
