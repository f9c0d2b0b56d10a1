//! Agent profile record

use serde::Serialize;
use serde::de::Error as _;
use serde_yaml::{Mapping, Value};

use super::error::Problem;
use super::options::{LlmOptions, RawLlmOptions, take};

/// A named bundle describing how to invoke one model with a fixed system prompt
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentProfile {
    /// Human-readable label
    pub display_name: String,

    /// Model invocation options
    pub llm_options: LlmOptions,

    /// Instruction text prepended to every request made under this profile
    pub system_prompt: String,

    /// Other profile-level keys (description, tools, ...), kept verbatim
    #[serde(flatten)]
    pub extra: Mapping,
}

impl AgentProfile {
    pub fn new(display_name: impl Into<String>, llm_options: LlmOptions, system_prompt: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            llm_options,
            system_prompt: system_prompt.into(),
            extra: Mapping::new(),
        }
    }

    pub fn model(&self) -> &str {
        &self.llm_options.model
    }

    pub fn temperature(&self) -> Option<f64> {
        self.llm_options.temperature
    }

    /// `description` from the pass-through keys, if it is a string
    pub fn description(&self) -> Option<&str> {
        self.extra.get("description").and_then(|v| v.as_str())
    }
}

/// A profile as written in the document. Required fields are optional here so
/// that a missing field surfaces as a validation problem rather than a parse error.
#[derive(Debug, Default)]
pub(crate) struct RawProfile {
    pub display_name: Option<String>,
    pub llm_options: Option<RawLlmOptions>,
    pub system_prompt: Option<String>,
    pub extra: Mapping,
}

impl RawProfile {
    /// Build from one profile entry. Merge keys (`<<: *anchor`) are applied
    /// first, so merged fields count as written.
    pub fn from_value(mut value: Value) -> Result<Self, serde_yaml::Error> {
        value.apply_merge()?;

        let mut map = match value {
            Value::Mapping(map) => map,
            Value::Null => return Ok(Self::default()),
            _ => return Err(serde_yaml::Error::custom("profile must be a mapping")),
        };

        let llm_options = match map.shift_remove("llm_options") {
            None | Some(Value::Null) => None,
            Some(options) => Some(RawLlmOptions::from_value(options)?),
        };

        Ok(Self {
            display_name: take(&mut map, "display_name")?,
            llm_options,
            system_prompt: take(&mut map, "system_prompt")?,
            extra: map,
        })
    }

    pub fn validate(self) -> Result<AgentProfile, Problem> {
        let display_name = match self.display_name {
            Some(name) if !name.trim().is_empty() => name,
            _ => return Err(Problem::MissingDisplayName),
        };

        let llm_options = self.llm_options.ok_or(Problem::MissingLlmOptions)?.validate()?;

        let system_prompt = self.system_prompt.ok_or(Problem::MissingSystemPrompt)?;

        Ok(AgentProfile {
            display_name,
            llm_options,
            system_prompt,
            extra: self.extra,
        })
    }
}
