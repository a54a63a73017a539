//! Bondscribe CLI - Bond extraction and intent classification for trading chat.

use bondscribe_cli::cli::ReplArgs;
use bondscribe_cli::commands;
use bondscribe_cli::repl;
use bondscribe_cli::{Cli, Command, Config, Formatter};
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli: Cli) -> bondscribe_cli::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(model) = cli.model {
        config.extractor.model = model;
    }
    config
        .extractor
        .validate()
        .map_err(bondscribe_cli::CliError::Config)?;

    let format = cli.format.map(Into::into).unwrap_or(config.settings.format);
    let color_enabled = !cli.no_color && config.settings.color;
    let formatter = Formatter::new(format, color_enabled);
    let api_key = cli.api_key.as_deref();

    match cli.command {
        None => repl::run_repl(ReplArgs::default(), &config, api_key, &formatter)?,
        Some(Command::Repl(args)) => repl::run_repl(args, &config, api_key, &formatter)?,
        Some(Command::Extract(args)) => {
            commands::execute_extract(args, &config, api_key, &formatter)?
        }
        Some(Command::Classify(args)) => {
            commands::execute_classify(args, &config, api_key, &formatter)?
        }
    }

    Ok(())
}
