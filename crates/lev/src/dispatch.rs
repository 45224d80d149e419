//! Command dispatch module for routing CLI commands to their handlers.

use crate::cli::{Cli, Commands, ConfigCommands};
use crate::commands::{self, CommandContext, CommandError, Outcome, Result};

/// Runs the command selected on the command line.
pub fn execute(cli: &Cli, ctx: &CommandContext) -> Result<Outcome> {
    match &cli.command {
        Some(Commands::Eval {
            expression,
            var,
            list,
            vars_file,
        }) => {
            let opts = commands::eval::EvalCommandOptions {
                expression: expression.clone(),
                vars: var.clone(),
                lists: list.clone(),
                vars_file: vars_file.clone(),
            };
            commands::eval::execute(ctx, &opts)
        }
        Some(Commands::Filter { expression, input }) => {
            let opts = commands::filter::FilterOptions {
                expression: expression.clone(),
                input: input.clone(),
            };
            commands::filter::execute(ctx, &opts)
        }
        Some(Commands::Check { expression }) => commands::check::execute(ctx, expression),
        Some(Commands::Usage) => commands::usage::execute(ctx),
        Some(Commands::Config { command }) => dispatch_config(ctx, command),
        Some(Commands::Completions { shell }) => {
            commands::completions::execute(shell).map_err(CommandError::Io)?;
            Ok(Outcome::Success)
        }
        None => {
            if !ctx.quiet {
                println!("lev - logical expression evaluator");
                println!("Use --help for usage information, or 'lev usage' for the expression language");
            }
            Ok(Outcome::Success)
        }
    }
}

/// Dispatch config subcommands.
fn dispatch_config(ctx: &CommandContext, command: &Option<ConfigCommands>) -> Result<Outcome> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::execute_show(ctx),
        Some(ConfigCommands::Path) => commands::config::execute_path(ctx),
        Some(ConfigCommands::Init { force }) => commands::config::execute_init(ctx, *force),
    }
}

/// Commands that must run even when the config file is unreadable.
pub fn skips_config(cli: &Cli) -> bool {
    matches!(
        cli.command,
        Some(Commands::Config { .. }) | Some(Commands::Completions { .. })
    )
}
