//! Model invocation options attached to a profile
//!
//! Only `model`, `api_base` and `temperature` are interpreted. Everything else
//! under `llm_options` is provider-specific and kept verbatim in `extra`, in
//! document order, so it survives a load/export cycle untouched.

use serde::Serialize;
use serde::de::{DeserializeOwned, Error as _};
use serde_yaml::{Mapping, Value};

use super::error::Problem;

/// Inclusive sampling temperature bounds accepted by the loader
pub const TEMPERATURE_RANGE: std::ops::RangeInclusive<f64> = 0.0..=2.0;

/// Validated LLM options
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LlmOptions {
    /// Model identifier, e.g. "groq/llama-3.3-70b-versatile" or "gpt-4o"
    pub model: String,

    /// Endpoint override for the provider
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,

    /// Sampling temperature; `None` means the provider default
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Unrecognized provider keys, passed through unchanged (tags and non-string keys included)
    #[serde(flatten)]
    pub extra: Mapping,
}

impl LlmOptions {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            api_base: None,
            temperature: None,
            extra: Mapping::new(),
        }
    }

    /// Provider prefix of the model identifier, if it has one
    pub fn provider(&self) -> Option<&str> {
        self.model.split_once('/').map(|(provider, _)| provider)
    }

    /// Model identifier without its provider prefix
    pub fn model_name(&self) -> &str {
        self.model.split_once('/').map(|(_, name)| name).unwrap_or(&self.model)
    }

    /// Look up a pass-through key
    pub fn extra(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }
}

/// `llm_options` as written in the document, before validation
#[derive(Debug, Default)]
pub(crate) struct RawLlmOptions {
    pub model: Option<String>,
    pub api_base: Option<String>,
    pub temperature: Option<f64>,
    pub extra: Mapping,
}

/// Remove `key` from `map` and convert it; absent and null both read as `None`
pub(crate) fn take<T: DeserializeOwned>(map: &mut Mapping, key: &str) -> Result<Option<T>, serde_yaml::Error> {
    match map.shift_remove(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => serde_yaml::from_value(value)
            .map(Some)
            .map_err(|e| serde_yaml::Error::custom(format!("`{}`: {}", key, e))),
    }
}

impl RawLlmOptions {
    /// Split the interpreted keys out of an `llm_options` mapping; the rest stays in `extra`
    pub fn from_value(value: Value) -> Result<Self, serde_yaml::Error> {
        let mut map = match value {
            Value::Mapping(map) => map,
            Value::Null => Mapping::new(),
            _ => return Err(serde_yaml::Error::custom("`llm_options` must be a mapping")),
        };

        Ok(Self {
            model: take(&mut map, "model")?,
            api_base: take(&mut map, "api_base")?,
            temperature: take(&mut map, "temperature")?,
            extra: map,
        })
    }

    pub fn validate(self) -> Result<LlmOptions, Problem> {
        let model = match self.model {
            Some(m) if !m.trim().is_empty() => m,
            _ => return Err(Problem::MissingModel),
        };

        if let Some(t) = self.temperature {
            if !t.is_finite() || !TEMPERATURE_RANGE.contains(&t) {
                return Err(Problem::TemperatureOutOfRange(t));
            }
        }

        Ok(LlmOptions {
            model,
            api_base: self.api_base,
            temperature: self.temperature,
            extra: self.extra,
        })
    }
}
