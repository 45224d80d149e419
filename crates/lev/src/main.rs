use clap::Parser;
use std::process::ExitCode;

mod cli;
mod commands;
mod dispatch;
mod logging;
mod output;
mod records;

use cli::Cli;
use commands::config::{load_config, Config};
use commands::{CommandContext, CommandError, Outcome};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(outcome) => outcome.exit_code(),
        Err(e) => {
            report_error(&cli, &e);
            e.exit_code()
        }
    }
}

fn run(cli: &Cli) -> commands::Result<Outcome> {
    // config commands load the file themselves and must work when it is broken
    let config = if dispatch::skips_config(cli) {
        Config::default()
    } else {
        load_config()?
    };

    logging::init_logging(cli, &config);
    let ctx = CommandContext::new(cli, &config);

    dispatch::execute(cli, &ctx)
}

fn report_error(cli: &Cli, e: &CommandError) {
    tracing::debug!(code = e.code(), "command failed");

    if cli.json {
        let error_json = serde_json::json!({
            "error": {
                "code": e.code(),
                "message": e.to_string(),
            }
        });
        eprintln!("{error_json:#}");
    } else {
        eprintln!("Error: {e}");
    }
}
