//! CLI argument parsing using clap derive macros.
//!
//! This module defines the command-line interface for the lev CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// lev - Evaluate logical filter expressions against variables
#[derive(Parser, Debug)]
#[command(name = "lev")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode (errors only)
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    /// Disable colors in output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Log filter (e.g. "debug" or "logical_eval=trace")
    #[arg(long, global = true, env = "LEV_LOG", value_name = "FILTER")]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate an expression against variables given on the command line
    #[command(alias = "e")]
    Eval {
        /// Expression to evaluate (e.g. "a = '1' and b ~ '^x'")
        expression: String,

        /// Set a variable (repeatable)
        #[arg(long = "var", value_name = "NAME=VALUE", value_parser = parse_assignment)]
        var: Vec<(String, String)>,

        /// Set a list variable from comma-separated items (repeatable)
        #[arg(long = "list", value_name = "NAME=A,B,C", value_parser = parse_assignment)]
        list: Vec<(String, String)>,

        /// Load variables from a JSON object file (flags override it)
        #[arg(long = "vars", value_name = "FILE")]
        vars_file: Option<PathBuf>,
    },

    /// Print the JSON records that match an expression
    #[command(alias = "f")]
    Filter {
        /// Expression each record must satisfy
        expression: String,

        /// JSON array or newline-delimited objects (default: stdin)
        #[arg(short, long, value_name = "FILE")]
        input: Option<PathBuf>,
    },

    /// Parse an expression without evaluating it
    #[command(alias = "c")]
    Check {
        /// Expression to check
        expression: String,
    },

    /// Describe the expression language
    Usage,

    /// View and create configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

/// Shell types for completions
#[derive(ValueEnum, Clone, Debug)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print config file path
    Path,

    /// Write a commented default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Parses a `NAME=VALUE` argument.
///
/// Only the first `=` separates name from value, so values may contain `=`.
/// Names are limited to the characters an expression can reference.
pub fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{s}'"))?;

    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing variable name in '{s}'"));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '.') {
        return Err(format!(
            "invalid variable name '{name}' (use letters, digits and dots)"
        ));
    }

    Ok((name.to_string(), value.to_string()))
}
