//! Command implementations for the lev CLI.
//!
//! This module contains the actual command handlers that are invoked by the CLI.

pub mod check;
pub mod completions;
pub mod config;
pub mod eval;
pub mod filter;
pub mod usage;

use std::io::IsTerminal;
use std::process::ExitCode;

use logical_eval::{EvalError, EvalOptions};

use crate::cli::Cli;
use config::Config;

/// Error type for command execution.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Expression scanning, parsing or pattern error.
    #[error("expression error: {0}")]
    Expression(#[from] EvalError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// Input that is valid JSON but not the expected shape.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CommandError {
    /// Returns the error code string for JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            CommandError::Expression(e) => match e.kind() {
                logical_eval::ErrorKind::Lexical => "LEXICAL_ERROR",
                logical_eval::ErrorKind::Syntax => "SYNTAX_ERROR",
                logical_eval::ErrorKind::Pattern => "PATTERN_ERROR",
            },
            CommandError::Config(_) => "CONFIG_ERROR",
            CommandError::InvalidInput(_) => "INPUT_ERROR",
            CommandError::Io(_) => "IO_ERROR",
            CommandError::Json(_) => "JSON_ERROR",
        }
    }

    /// Returns the process exit status for this error.
    pub fn exit_status(&self) -> u8 {
        match self {
            CommandError::Expression(_) => 2,
            CommandError::Io(_) => 3,
            CommandError::Json(_) | CommandError::InvalidInput(_) => 4,
            CommandError::Config(_) => 5,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

/// Result type for command execution.
pub type Result<T> = std::result::Result<T, CommandError>;

/// What a successful command reports through the exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Exit 0.
    Success,
    /// The expression evaluated to false; exit 1.
    NoMatch,
}

impl Outcome {
    pub fn exit_status(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::NoMatch => 1,
        }
    }

    pub fn exit_code(self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

/// Context for command execution, containing common dependencies.
pub struct CommandContext {
    /// Whether to output JSON.
    pub json_output: bool,
    /// Whether to use colors.
    pub use_colors: bool,
    /// Whether to be quiet (errors only).
    pub quiet: bool,
    /// Whether to be verbose.
    pub verbose: bool,
    /// Parser settings taken from the config file.
    pub eval_options: EvalOptions,
}

impl CommandContext {
    /// Creates a new command context from CLI arguments and loaded config.
    pub fn new(cli: &Cli, config: &Config) -> Self {
        Self {
            json_output: cli.json,
            use_colors: !cli.no_color
                && config.output.color.unwrap_or(true)
                && std::env::var_os("NO_COLOR").is_none()
                && std::io::stdout().is_terminal(),
            quiet: cli.quiet,
            verbose: cli.verbose,
            eval_options: config.eval_options(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_expression_error_codes_follow_kind() {
        let lexical = CommandError::from(EvalError::unknown_character('&', 3));
        assert_eq!(lexical.code(), "LEXICAL_ERROR");

        let syntax = CommandError::from(logical_eval::parse("a =").unwrap_err());
        assert_eq!(syntax.code(), "SYNTAX_ERROR");

        let pattern = CommandError::from(EvalError::invalid_pattern("(", "unclosed group"));
        assert_eq!(pattern.code(), "PATTERN_ERROR");
        assert_eq!(pattern.exit_status(), 2);
    }

    #[test]
    fn test_error_exit_codes() {
        let io = CommandError::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(io.exit_status(), 3);
        assert_eq!(io.code(), "IO_ERROR");

        let json = CommandError::from(serde_json::from_str::<u8>("x").unwrap_err());
        assert_eq!(json.exit_status(), 4);

        assert_eq!(CommandError::InvalidInput("x".into()).exit_status(), 4);
        assert_eq!(CommandError::Config("x".into()).exit_status(), 5);
    }

    #[test]
    fn test_error_message_prefix() {
        let err = CommandError::Config("bad value".to_string());
        assert_eq!(err.to_string(), "configuration error: bad value");
    }

    #[test]
    fn test_outcome_exit_codes() {
        assert_eq!(Outcome::Success.exit_status(), 0);
        assert_eq!(Outcome::NoMatch.exit_status(), 1);
    }

    #[test]
    fn test_context_takes_max_depth_from_config() {
        let cli = Cli::parse_from(["lev", "--no-color", "usage"]);
        let mut config = Config::default();
        config.eval.max_depth = Some(7);

        let ctx = CommandContext::new(&cli, &config);
        assert!(!ctx.use_colors);
        assert_eq!(ctx.eval_options.max_depth, 7);
    }
}
