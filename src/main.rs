use anyhow::Result;
use clap::Parser;
use colored::*;
use tracing_subscriber::EnvFilter;

use fedipost::app::App;
use fedipost::{cli, error, errors, paths};

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    // .env may carry RUST_LOG or FEDIPOST_CONFIG, so load it first
    let env_file = paths::load_env_file();
    init_logging(cli.verbose);
    if let Some(path) = env_file {
        tracing::debug!(path = %path.display(), "loaded env file");
    }

    let config_path = paths::find_config_file(cli.config.as_deref());
    let result = match cli.command {
        Some(cli::Commands::Show) => App::show(&config_path),
        Some(cli::Commands::Logout) => App::logout(&config_path),
        None => App::run(&config_path).await,
    };

    match result {
        Ok(()) => Ok(()),
        Err(e) if errors::is_cancelled(&e) => {
            println!("{}", "Cancelled.".yellow());
            Ok(())
        }
        Err(e) => {
            tracing::error!(error = %error::format_error_chain(&e), "session failed");
            eprintln!("{} {}", "Error:".red().bold(), error::format_error_chain(&e));
            if let Some(hint) = error::hint_for(&e) {
                eprintln!("  {}", hint.yellow());
            }
            std::process::exit(1);
        }
    }
}
