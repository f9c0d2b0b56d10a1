//! Profile registry: load once, read many

use indexmap::IndexMap;
use log::{debug, info};
use std::fs;
use std::path::Path;

use super::error::{Problem, RegistryError};
use super::model::AgentProfile;
use super::section::SectionSelector;

/// Immutable mapping from profile key to [`AgentProfile`], in document order
#[derive(Debug, Clone, PartialEq)]
pub struct Registry {
    selector: SectionSelector,
    profiles: IndexMap<String, AgentProfile>,
}

impl Registry {
    /// Parse profiles from the `agent_profiles` section of a YAML document
    pub fn load(source: &str) -> Result<Self, RegistryError> {
        Self::load_with(source, &SectionSelector::default())
    }

    /// Parse profiles from the section named by `selector`.
    ///
    /// Profiles are validated in document order and the first problem aborts
    /// the load; a registry is never returned with some profiles missing.
    pub fn load_with(source: &str, selector: &SectionSelector) -> Result<Self, RegistryError> {
        let entries = selector.extract(source)?;

        let mut profiles = IndexMap::with_capacity(entries.len());
        for (key, raw) in entries {
            if profiles.contains_key(&key) {
                return Err(RegistryError::invalid(key, Problem::DuplicateKey));
            }

            let profile = raw
                .unwrap_or_default()
                .validate()
                .map_err(|problem| RegistryError::invalid(key.as_str(), problem))?;

            debug!("Loaded profile '{}' using model {}", key, profile.model());
            profiles.insert(key, profile);
        }

        info!("Loaded {} profile(s) from section '{}'", profiles.len(), selector);
        Ok(Self {
            selector: selector.clone(),
            profiles,
        })
    }

    /// Read and parse a profiles file
    pub fn from_path(path: &Path, selector: &SectionSelector) -> Result<Self, RegistryError> {
        let content = fs::read_to_string(path).map_err(|source| RegistryError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        debug!("Read {} bytes from {}", content.len(), path.display());
        Self::load_with(&content, selector)
    }

    /// Look up a profile; unknown keys are an error, never a fallback
    pub fn get(&self, key: &str) -> Result<&AgentProfile, RegistryError> {
        self.profiles
            .get(key)
            .ok_or_else(|| RegistryError::NotFound(key.to_string()))
    }

    /// Profile keys in document order. Each call starts a fresh pass.
    pub fn list_keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.profiles.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AgentProfile)> + '_ {
        self.profiles.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.profiles.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn selector(&self) -> &SectionSelector {
        &self.selector
    }

    /// Serialize back into the configuration format, nested under the same section
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        let mut doc = serde_yaml::to_value(&self.profiles)?;
        for key in self.selector.path().into_iter().rev() {
            let mut wrapper = serde_yaml::Mapping::new();
            wrapper.insert(serde_yaml::Value::String(key.to_string()), doc);
            doc = serde_yaml::Value::Mapping(wrapper);
        }
        serde_yaml::to_string(&doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::error::ErrorKind;
    use std::sync::Arc;

    const SCENARIO: &str = r#"
agent_profiles:
  a:
    display_name: A
    llm_options:
      model: m1
    system_prompt: p1
  b:
    display_name: B
    llm_options:
      model: m2
      temperature: 0.5
    system_prompt: p2
"#;

    const RICH: &str = r#"
# shared team profiles
agent_profiles:
  researcher:
    display_name: Research Assistant
    description: Finds and summarizes sources
    llm_options:
      model: groq/llama-3.3-70b-versatile
      api_base: https://api.groq.com/openai/v1
      temperature: 0.0
      # custom_llm_provider: openai
      max_tokens: 4096
      stop: ["\n\n"]
    system_prompt: |
      You are a careful research assistant.
      Cite every claim.
  coder:
    display_name: Coder
    llm_options:
      model: gpt-4o-mini
      temperature: 1.2
    system_prompt: You write Rust.
"#;

    #[test]
    fn test_scenario_two_profiles() {
        let registry = Registry::load(SCENARIO).unwrap();

        assert_eq!(registry.list_keys().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(registry.get("a").unwrap().llm_options.temperature, None);
        assert_eq!(registry.get("b").unwrap().llm_options.temperature, Some(0.5));
        assert_eq!(registry.get("b").unwrap().model(), "m2");
    }

    #[test]
    fn test_fields_match_source() {
        let registry = Registry::load(RICH).unwrap();
        let researcher = registry.get("researcher").unwrap();

        assert_eq!(researcher.display_name, "Research Assistant");
        assert_eq!(researcher.llm_options.model, "groq/llama-3.3-70b-versatile");
        assert_eq!(
            researcher.llm_options.api_base.as_deref(),
            Some("https://api.groq.com/openai/v1")
        );
        assert_eq!(researcher.llm_options.temperature, Some(0.0));
        assert_eq!(
            researcher.system_prompt,
            "You are a careful research assistant.\nCite every claim.\n"
        );
        assert_eq!(researcher.description(), Some("Finds and summarizes sources"));

        // commented-out override never reaches the options
        assert!(researcher.llm_options.extra("custom_llm_provider").is_none());
        assert_eq!(
            researcher.llm_options.extra("max_tokens"),
            Some(&serde_yaml::Value::from(4096))
        );
    }

    #[test]
    fn test_list_keys_is_restartable() {
        let registry = Registry::load(RICH).unwrap();
        let first: Vec<_> = registry.list_keys().collect();
        let second: Vec<_> = registry.list_keys().collect();
        assert_eq!(first, vec!["researcher", "coder"]);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_required_fields() {
        let cases = [
            ("llm_options: {model: m}\n    system_prompt: p", Problem::MissingDisplayName),
            ("display_name: X\n    llm_options: {temperature: 0.1}\n    system_prompt: p", Problem::MissingModel),
            ("display_name: X\n    llm_options: {model: m}", Problem::MissingSystemPrompt),
        ];

        for (body, expected) in cases {
            let source = format!("agent_profiles:\n  x:\n    {}\n", body);
            match Registry::load(&source) {
                Err(RegistryError::Validation { key, problem }) => {
                    assert_eq!(key, "x");
                    assert_eq!(problem, expected);
                }
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let source = r#"
agent_profiles:
  a: {display_name: A, llm_options: {model: m1}, system_prompt: p1}
  a: {display_name: A2, llm_options: {model: m2}, system_prompt: p2}
"#;
        let err = Registry::load(source).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(
            err,
            RegistryError::Validation { ref key, problem: Problem::DuplicateKey } if key == "a"
        ));
    }

    #[test]
    fn test_no_partial_registry_on_late_failure() {
        let source = r#"
agent_profiles:
  good: {display_name: G, llm_options: {model: m}, system_prompt: p}
  bad: {display_name: B, system_prompt: p}
"#;
        assert!(Registry::load(source).is_err());
    }

    #[test]
    fn test_malformed_source_is_parse_error() {
        let err = Registry::load("agent_profiles: [\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_wrong_value_type_is_parse_error() {
        let err = Registry::load("agent_profiles:\n  a:\n    display_name: [1, 2]\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_missing_section_is_validation_error() {
        let err = Registry::load("profiles: {}\n").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn test_get_unknown_key() {
        let registry = Registry::load(SCENARIO).unwrap();
        let err = registry.get("c").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.to_string(), "Profile 'c' not found");
        assert!(!registry.contains("c"));
    }

    #[test]
    fn test_empty_section() {
        let registry = Registry::load("agent_profiles: {}\n").unwrap();
        assert!(registry.is_empty());
        assert_eq!(registry.list_keys().count(), 0);
    }

    #[test]
    fn test_round_trip() {
        let registry = Registry::load(RICH).unwrap();
        let yaml = registry.to_yaml().unwrap();
        let reloaded = Registry::load(&yaml).unwrap();

        assert_eq!(reloaded.list_keys().collect::<Vec<_>>(), registry.list_keys().collect::<Vec<_>>());
        for (key, profile) in registry.iter() {
            assert_eq!(reloaded.get(key).unwrap(), profile);
        }
    }

    #[test]
    fn test_round_trip_with_parent_section() {
        let source = "team:\n  bots:\n    a: {display_name: A, llm_options: {model: m, temperature: 0.7}, system_prompt: p}\n";
        let selector = SectionSelector::new("bots").with_parent("team");
        let registry = Registry::load_with(source, &selector).unwrap();

        let yaml = registry.to_yaml().unwrap();
        assert!(yaml.starts_with("team:"));

        let reloaded = Registry::load_with(&yaml, &selector).unwrap();
        assert_eq!(reloaded, registry);
    }

    #[test]
    fn test_tagged_pass_through_survives_round_trip() {
        let source = "agent_profiles:\n  a: {display_name: A, llm_options: {model: m, api_key: !env FOO}, system_prompt: p, tools: !python get_weather}\n";
        let registry = Registry::load(source).unwrap();
        let profile = registry.get("a").unwrap();
        assert!(matches!(profile.llm_options.extra("api_key"), Some(serde_yaml::Value::Tagged(_))));

        let yaml = registry.to_yaml().unwrap();
        assert!(yaml.contains("!env FOO"));
        let reloaded = Registry::load(&yaml).unwrap();
        assert_eq!(reloaded.get("a").unwrap(), profile);
    }

    #[test]
    fn test_merged_llm_options() {
        let source = r#"
defaults: &d {model: m, temperature: 0.3}
agent_profiles:
  a:
    display_name: A
    llm_options: {<<: *d}
    system_prompt: p
  b:
    display_name: B
    llm_options:
      <<: *d
      temperature: 0.9
    system_prompt: p
"#;
        let registry = Registry::load(source).unwrap();
        let a = registry.get("a").unwrap();
        assert_eq!(a.model(), "m");
        assert_eq!(a.temperature(), Some(0.3));
        assert!(a.llm_options.extra.is_empty());

        // explicit keys win over merged ones
        assert_eq!(registry.get("b").unwrap().temperature(), Some(0.9));
    }

    #[test]
    fn test_numeric_profile_key_rejected() {
        let err = Registry::load("agent_profiles:\n  1: {display_name: A, llm_options: {model: m}, system_prompt: p}\n")
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    }

    #[test]
    fn test_numeric_pass_through_key_round_trips() {
        let source = "agent_profiles:\n  a: {display_name: A, llm_options: {model: m, 7: seven}, system_prompt: p}\n";
        let registry = Registry::load(source).unwrap();
        let reloaded = Registry::load(&registry.to_yaml().unwrap()).unwrap();

        let extra = &reloaded.get("a").unwrap().llm_options.extra;
        assert_eq!(extra.get(serde_yaml::Value::from(7)), Some(&serde_yaml::Value::from("seven")));
        assert!(extra.get("7").is_none());
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let err = Registry::from_path(&dir.path().join("absent.yaml"), &SectionSelector::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
        assert!(err.to_string().contains("absent.yaml"));
    }

    #[test]
    fn test_from_path_reads_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("agent_profiles.yaml");
        fs::write(&path, SCENARIO).unwrap();

        let registry = Registry::from_path(&path, &SectionSelector::default()).unwrap();
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_shared_across_threads() {
        let registry = Arc::new(Registry::load(SCENARIO).unwrap());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.get("b").unwrap().temperature())
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Some(0.5));
        }
    }
}
