use clap::{Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;

/// Output format for commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl OutputFormat {
    /// Resolve the effective output format.
    /// If user specified a format, use it.
    /// Otherwise: TTY → Text, non-TTY (pipe) → Json
    pub fn resolve(user_choice: Option<OutputFormat>) -> OutputFormat {
        match user_choice {
            Some(fmt) => fmt,
            None => {
                if std::io::stdout().is_terminal() {
                    OutputFormat::Text
                } else {
                    OutputFormat::Json
                }
            }
        }
    }
}

#[derive(Parser)]
#[command(
    name = "agent-profiles",
    about = "Inspect and validate LLM agent profile documents",
    version = env!("GIT_DESCRIBE"),
    after_help = "Logs are written to: ~/.local/share/agent-profiles/logs/agent-profiles.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to agent-profiles config file")]
    pub config: Option<PathBuf>,

    /// Profiles document (overrides profiles_file from config)
    #[arg(short, long, global = true)]
    pub file: Option<PathBuf>,

    /// Section holding the profiles (overrides config)
    #[arg(long, global = true, env = "AGENT_SECTION")]
    pub section: Option<String>,

    /// Parent section the profile section is nested in (overrides config)
    #[arg(long, global = true, env = "AGENT_PARENT_SECTION")]
    pub parent_section: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List profiles in document order
    List {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Show one profile
    Show {
        /// Profile key
        key: String,

        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },

    /// Print a profile's system prompt
    Prompt {
        /// Profile key
        key: String,
    },

    /// Load the profiles document and report whether it is valid
    Validate,

    /// Write the loaded profiles back out as YAML
    Export {
        /// Destination file (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration
    Show {
        /// Output format (default: text for TTY, json for pipes)
        #[arg(long, short = 'o', value_enum)]
        format: Option<OutputFormat>,
    },
}
