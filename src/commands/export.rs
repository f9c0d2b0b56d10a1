//! Export the loaded profiles as YAML

use colored::*;
use eyre::{Context, Result};
use std::fs;
use std::path::Path;

use agent_profiles::config::Config;

use super::load_registry;

pub fn run(output: Option<&Path>, config: &Config) -> Result<()> {
    let registry = load_registry(config)?;
    let yaml = registry.to_yaml().context("Failed to serialize profiles")?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(path, &yaml).with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Exported {} profile(s) to {}", registry.len(), path.display());
            eprintln!("{} Exported {} profile(s) to {}", "✓".green(), registry.len(), path.display());
        }
        None => print!("{}", yaml),
    }

    Ok(())
}
