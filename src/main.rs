use clap::Parser;
use eyre::{Context, Result};
use log::info;
use std::fs;
use std::path::PathBuf;

mod cli;
mod commands;

use agent_profiles::config::{Config, LogLevel};
use cli::{Cli, Commands};

fn setup_logging(log_level: &LogLevel) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("agent-profiles")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    let log_file = log_dir.join("agent-profiles.log");

    let target = Box::new(
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)
            .context("Failed to open log file")?,
    );

    // RUST_LOG env var takes precedence, otherwise use config log_level
    let mut builder = env_logger::Builder::new();

    if std::env::var("RUST_LOG").is_ok() {
        builder.parse_default_env();
    } else {
        builder.filter_level(match log_level {
            LogLevel::Trace => log::LevelFilter::Trace,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Off => log::LevelFilter::Off,
        });
    }

    builder.target(env_logger::Target::Pipe(target)).init();

    info!("Logging initialized, writing to: {}", log_file.display());
    info!(
        "Log level: {} (from {})",
        log_level.as_filter(),
        if std::env::var("RUST_LOG").is_ok() { "RUST_LOG env" } else { "config" }
    );
    Ok(())
}

/// Command-line flags win over the config file
fn apply_overrides(cli: &Cli, mut config: Config) -> Config {
    if let Some(ref file) = cli.file {
        config.profiles_file = file.clone();
    }
    if let Some(ref section) = cli.section {
        config.section = section.clone();
    }
    if let Some(ref parent) = cli.parent_section {
        config.parent_section = Some(parent.clone());
    }
    config
}

fn run(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::List { format } => commands::list::run(cli::OutputFormat::resolve(format), &config),
        Commands::Show { key, format } => commands::show::run(&key, cli::OutputFormat::resolve(format), &config),
        Commands::Prompt { key } => commands::show::prompt(&key, &config),
        Commands::Validate => commands::validate::run(&config),
        Commands::Export { output } => commands::export::run(output.as_deref(), &config),
        Commands::Config { action } => commands::config::run(action, &config),
        Commands::Completions { shell } => commands::completions::run(shell),
    }
}

fn main() -> Result<()> {
    // Parse CLI arguments first
    let cli = Cli::parse();

    // Load configuration (before logging, so log messages in Config::load are silent)
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    let config = apply_overrides(&cli, config);

    setup_logging(&config.log_level).context("Failed to setup logging")?;

    info!("Starting agent-profiles with config from: {:?}", cli.config);

    run(cli, config).context("Command failed")?;

    Ok(())
}
