//! Structured logging with environment variable configuration.
//!
//! Logs are written to stderr so they never mix with results on stdout.

use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::commands::config::Config;

/// Filter used when nothing else selects one.
const DEFAULT_LEVEL: &str = "warn";

/// Picks the filter directive.
///
/// Precedence (highest to lowest):
///
/// 1. `--log-level`, or `LEV_LOG` (clap reads the variable into the flag)
/// 2. `--verbose` (`debug`) or `--quiet` (`error`)
/// 3. `[log] level` in the config file
/// 4. `warn`
fn filter_directive(cli: &Cli, config: &Config) -> String {
    if let Some(level) = cli.log_level.as_deref().filter(|l| !l.trim().is_empty()) {
        return level.to_string();
    }
    if cli.verbose {
        return "debug".to_string();
    }
    if cli.quiet {
        return "error".to_string();
    }
    config
        .log
        .level
        .clone()
        .unwrap_or_else(|| DEFAULT_LEVEL.to_string())
}

fn build_filter(directive: &str) -> EnvFilter {
    EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

/// Initialise the logging subsystem.
///
/// If a global subscriber is already set, this function silently ignores
/// the error. The first subscriber wins.
pub fn init_logging(cli: &Cli, config: &Config) {
    let directive = filter_directive(cli, config);
    let filter = build_filter(&directive);

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
    tracing::debug!(filter = %directive, "logging initialised");
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn cli(args: &[&str]) -> Cli {
        let mut argv = vec!["lev"];
        argv.extend_from_slice(args);
        argv.push("usage");
        let mut cli = Cli::parse_from(argv);
        if !args.contains(&"--log-level") {
            cli.log_level = None;
        }
        cli
    }

    fn config_with_level(level: &str) -> Config {
        let mut config = Config::default();
        config.log.level = Some(level.to_string());
        config
    }

    #[test]
    fn test_flag_beats_verbose_and_config() {
        let cli = cli(&["--log-level", "trace", "--verbose"]);
        assert_eq!(filter_directive(&cli, &config_with_level("info")), "trace");
    }

    #[test]
    fn test_verbose_beats_config() {
        let cli = cli(&["--verbose"]);
        assert_eq!(filter_directive(&cli, &config_with_level("info")), "debug");
    }

    #[test]
    fn test_quiet_selects_error() {
        let cli = cli(&["--quiet"]);
        assert_eq!(filter_directive(&cli, &Config::default()), "error");
    }

    #[test]
    fn test_config_then_default() {
        let cli = cli(&[]);
        assert_eq!(filter_directive(&cli, &config_with_level("info")), "info");
        assert_eq!(filter_directive(&cli, &Config::default()), "warn");
    }

    #[test]
    fn test_invalid_directive_falls_back() {
        let filter = build_filter("lev=loud");
        assert_eq!(filter.to_string(), DEFAULT_LEVEL);
    }

    #[test]
    fn test_init_logging_is_idempotent() {
        let cli = cli(&[]);
        init_logging(&cli, &Config::default());
        init_logging(&cli, &Config::default());
    }
}
