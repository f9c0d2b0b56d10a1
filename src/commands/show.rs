//! Show a single profile

use colored::*;
use eyre::Result;

use agent_profiles::config::Config;

use super::load_registry;
use crate::cli::OutputFormat;

pub fn run(key: &str, format: OutputFormat, config: &Config) -> Result<()> {
    let registry = load_registry(config)?;
    let profile = registry.get(key)?;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(profile)?),
        OutputFormat::Yaml => println!("{}", serde_yaml::to_string(profile)?),
        OutputFormat::Text => {
            println!("{} {}", "Profile:".bold(), key.green().bold());
            println!();
            println!("{} {}", "Display name:".bold(), profile.display_name);
            if let Some(description) = profile.description() {
                println!("{} {}", "Description:".bold(), description);
            }

            let opts = &profile.llm_options;
            println!();
            println!("{}", "LLM Options:".bold());
            println!("  model: {}", opts.model.cyan());
            if let Some(provider) = opts.provider() {
                println!("  provider: {}", provider.magenta());
            }
            if let Some(ref api_base) = opts.api_base {
                println!("  api_base: {}", api_base);
            }
            match opts.temperature {
                Some(t) => println!("  temperature: {}", t),
                None => println!("  temperature: {}", "(provider default)".dimmed()),
            }
            for (name, value) in &opts.extra {
                println!("  {}: {}", render_value(name), render_value(value).dimmed());
            }

            println!();
            println!("{}", "System Prompt:".bold());
            for line in profile.system_prompt.lines() {
                println!("  {}", line);
            }
        }
    }

    Ok(())
}

/// Print only the system prompt, verbatim
pub fn prompt(key: &str, config: &Config) -> Result<()> {
    let registry = load_registry(config)?;
    let profile = registry.get(key)?;
    print!("{}", profile.system_prompt);
    if !profile.system_prompt.ends_with('\n') {
        println!();
    }
    Ok(())
}

fn render_value(value: &serde_yaml::Value) -> String {
    match value {
        serde_yaml::Value::String(s) => s.clone(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().replace('\n', " "))
            .unwrap_or_else(|_| format!("{:?}", other)),
    }
}
