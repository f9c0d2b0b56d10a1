//! List profiles

use colored::*;
use eyre::Result;
use serde::Serialize;

use agent_profiles::config::Config;

use super::load_registry;
use crate::cli::OutputFormat;

#[derive(Serialize)]
struct ProfileSummary<'a> {
    key: &'a str,
    display_name: &'a str,
    model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f64>,
}

pub fn run(format: OutputFormat, config: &Config) -> Result<()> {
    let registry = load_registry(config)?;

    let summaries: Vec<ProfileSummary> = registry
        .iter()
        .map(|(key, profile)| ProfileSummary {
            key,
            display_name: &profile.display_name,
            model: profile.model(),
            temperature: profile.temperature(),
        })
        .collect();

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&summaries)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(&summaries)?),
        OutputFormat::Text => {
            println!("{}", "Agent Profiles:".bold());
            println!();

            if summaries.is_empty() {
                println!(
                    "  {} No profiles in section '{}' of {}",
                    "(none)".dimmed(),
                    registry.selector(),
                    config.profiles_path().display()
                );
                return Ok(());
            }

            for summary in &summaries {
                println!("  {} {} {}", "●".green(), summary.key.bold(), summary.display_name.dimmed());
                match summary.temperature {
                    Some(t) => println!("    Model: {} (temperature {})", summary.model.cyan(), t),
                    None => println!("    Model: {}", summary.model.cyan()),
                }
            }
        }
    }

    Ok(())
}
