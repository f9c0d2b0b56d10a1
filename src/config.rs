use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::profile::SectionSelector;
use crate::profile::section::DEFAULT_SECTION;

/// Environment variable pointing at an explicit config file
pub const CONFIG_ENV: &str = "AGENT_PROFILES_CONFIG";

/// Main agent-profiles configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// YAML document holding the profiles
    pub profiles_file: PathBuf,
    /// Mapping key the profiles live under
    pub section: String,
    /// Optional key the section is nested in
    pub parent_section: Option<String>,
    pub log_level: LogLevel,
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Off,
}

impl LogLevel {
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
            LogLevel::Off => "off",
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profiles_file: PathBuf::from("agent_profiles.yaml"),
            section: DEFAULT_SECTION.to_string(),
            parent_section: None,
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        if let Ok(env_path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(env_path);
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", CONFIG_ENV, e);
                    }
                }
            }
        }

        // Try ~/.config/agent-profiles/config.yaml
        if let Some(config_dir) = dirs::config_dir() {
            let path = config_dir.join("agent-profiles").join("config.yaml");
            if path.exists() {
                match Self::load_from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        log::warn!("Failed to load config from {}: {}", path.display(), e);
                    }
                }
            }
        }

        // Try ./agent-profiles.yaml (for development)
        let local_config = PathBuf::from("agent-profiles.yaml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    log::warn!("Failed to load local config: {}", e);
                }
            }
        }

        log::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        log::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }

    /// Section selector built from `section` and `parent_section`
    pub fn selector(&self) -> SectionSelector {
        let selector = SectionSelector::new(self.section.clone());
        match &self.parent_section {
            Some(parent) => selector.with_parent(parent.clone()),
            None => selector,
        }
    }

    /// Profiles file with ~ and env vars expanded
    pub fn profiles_path(&self) -> PathBuf {
        Self::expand_path(&self.profiles_file)
    }

    /// Expand a path that may contain ~ or env vars
    pub fn expand_path(path: &Path) -> PathBuf {
        let path_str = path.to_string_lossy();
        let expanded = shellexpand::full(&path_str).unwrap_or_else(|_| path_str.clone());
        PathBuf::from(expanded.as_ref())
    }
}
