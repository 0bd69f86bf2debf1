//! Stepwise CLI - apply and revert versioned SQL migrations

use clap::Parser;

mod cli;
mod commands;
mod context;

use cli::{Cli, GlobalArgs};
use commands::common::ExitCode;
use commands::{create, pending, to, up, version};

/// Route `log` output to stderr; `--verbose` turns on debug detail.
fn init_logging(global: &GlobalArgs) {
    let default_level = if global.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.global);

    let result = match &cli.command {
        cli::Commands::Up(args) => up::execute(args, &cli.global).await,
        cli::Commands::To(args) => to::execute(args, &cli.global).await,
        cli::Commands::Version(args) => version::execute(args, &cli.global).await,
        cli::Commands::Pending(args) => pending::execute(args, &cli.global).await,
        cli::Commands::Create(args) => create::execute(args, &cli.global).await,
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(err) => match err.downcast_ref::<ExitCode>() {
            Some(code) => std::process::ExitCode::from(code.0),
            None => {
                eprintln!("Error: {err:#}");
                std::process::ExitCode::FAILURE
            }
        },
    }
}
