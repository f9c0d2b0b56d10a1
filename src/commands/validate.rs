//! Validate a profiles document

use colored::*;
use eyre::Result;

use agent_profiles::config::Config;

use super::load_registry;

pub fn run(config: &Config) -> Result<()> {
    let registry = load_registry(config)?;

    println!(
        "{} {} is valid: {} profile(s) in section '{}'",
        "✓".green(),
        config.profiles_path().display(),
        registry.len(),
        registry.selector()
    );
    Ok(())
}
