use colored::*;
use eyre::Result;

use agent_profiles::config::Config;

use crate::cli::{ConfigAction, OutputFormat};

pub fn run(action: ConfigAction, config: &Config) -> Result<()> {
    match action {
        ConfigAction::Show { format } => show(OutputFormat::resolve(format), config),
    }
}

fn show(format: OutputFormat, config: &Config) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(config)?);
        }
        OutputFormat::Yaml => {
            println!("{}", serde_yaml::to_string(config)?);
        }
        OutputFormat::Text => {
            println!("{}", "agent-profiles Configuration".bold());
            println!();

            println!("{}:", "profiles".cyan());
            println!("  file: {}", config.profiles_path().display());
            println!("  section: {}", config.selector());
            println!();

            println!("{}: {}", "log_level".cyan(), config.log_level.as_filter());
        }
    }

    Ok(())
}
