//! Locating the profile mapping inside a document
//!
//! Profiles normally live under a top-level `agent_profiles` key, but a
//! document may keep several sections side by side, optionally grouped under a
//! parent key:
//!
//! ```yaml
//! staging:
//!   agent_profiles:
//!     writer: {...}
//! ```
//!
//! The document is walked with a [`DeserializeSeed`] instead of being parsed
//! into a map first, so every profile entry is seen exactly as written and
//! repeated keys are reported instead of silently collapsing.

use serde::de::{self, DeserializeSeed, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::fmt;

use super::error::RegistryError;
use super::model::RawProfile;

pub const DEFAULT_SECTION: &str = "agent_profiles";

/// Which mapping of the document holds the profiles
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSelector {
    pub section: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

impl Default for SectionSelector {
    fn default() -> Self {
        Self {
            section: DEFAULT_SECTION.to_string(),
            parent: None,
        }
    }
}

impl fmt::Display for SectionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parent {
            Some(parent) => write!(f, "{}.{}", parent, self.section),
            None => write!(f, "{}", self.section),
        }
    }
}

impl SectionSelector {
    pub fn new(section: impl Into<String>) -> Self {
        Self {
            section: section.into(),
            parent: None,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Keys leading to the profile mapping, outermost first
    pub fn path(&self) -> Vec<&str> {
        self.parent
            .as_deref()
            .into_iter()
            .chain(std::iter::once(self.section.as_str()))
            .collect()
    }

    /// Pull the raw profile entries out of `source`, in document order, duplicates included
    pub(crate) fn extract(&self, source: &str) -> Result<Vec<(String, Option<RawProfile>)>, RegistryError> {
        let path = self.path();
        let found = SectionSeed { path: &path }.deserialize(serde_yaml::Deserializer::from_str(source))?;

        match found {
            Some(entries) => Ok(entries.0),
            None => Err(RegistryError::MissingSection(self.to_string())),
        }
    }
}

/// Ordered profile entries, with repeated keys kept
struct Entries(Vec<(String, Option<RawProfile>)>);

impl<'de> Deserialize<'de> for Entries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(EntriesVisitor)
    }
}

struct EntriesVisitor;

impl<'de> Visitor<'de> for EntriesVisitor {
    type Value = Entries;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping of profile keys to profiles")
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(Entries(Vec::new()))
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        self.visit_unit()
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(key) = map.next_key::<Value>()? {
            // `1` and `'1'` are different YAML keys, so only real strings name a profile
            let key = match key {
                Value::String(key) => key,
                other => {
                    return Err(de::Error::custom(format!(
                        "profile keys must be strings, found {}",
                        render_key(&other)
                    )));
                }
            };

            let profile = match map.next_value::<Value>()? {
                Value::Null => None,
                value => Some(
                    RawProfile::from_value(value)
                        .map_err(|e| de::Error::custom(format!("profile '{}': {}", key, e)))?,
                ),
            };
            entries.push((key, profile));
        }
        Ok(Entries(entries))
    }
}

fn render_key(key: &Value) -> String {
    serde_yaml::to_string(key)
        .map(|s| s.trim_end().to_string())
        .unwrap_or_else(|_| format!("{:?}", key))
}

/// Descends one key of the selector path per mapping level
struct SectionSeed<'a> {
    path: &'a [&'a str],
}

impl<'de> DeserializeSeed<'de> for SectionSeed<'_> {
    type Value = Option<Entries>;

    fn deserialize<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }
}

impl<'de> Visitor<'de> for SectionSeed<'_> {
    type Value = Option<Entries>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a mapping")
    }

    // empty document or a null parent
    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
        let Some((head, rest)) = self.path.split_first() else {
            return Err(de::Error::custom("empty section path"));
        };

        let mut found = None;
        while let Some(key) = map.next_key::<Value>()? {
            if key.as_str() != Some(*head) {
                map.next_value::<IgnoredAny>()?;
                continue;
            }
            if found.is_some() {
                return Err(de::Error::custom(format!("section '{}' is defined more than once", head)));
            }
            found = if rest.is_empty() {
                Some(map.next_value::<Entries>()?)
            } else {
                map.next_value_seed(SectionSeed { path: rest })?
            };
        }
        Ok(found)
    }
}
