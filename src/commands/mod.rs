//! Subcommand implementations

use eyre::{Context, Result};

use agent_profiles::config::Config;
use agent_profiles::profile::Registry;

pub mod completions;
pub mod config;
pub mod export;
pub mod list;
pub mod show;
pub mod validate;

/// Load the registry named by the effective config
pub fn load_registry(config: &Config) -> Result<Registry> {
    let path = config.profiles_path();
    Registry::from_path(&path, &config.selector())
        .with_context(|| format!("Failed to load profiles from {}", path.display()))
}
