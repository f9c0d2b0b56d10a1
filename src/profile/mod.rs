//! Agent profiles
//!
//! A profile pairs a display name with model invocation options and a fixed
//! system prompt. Profiles are read from a YAML document into an immutable
//! [`Registry`] and looked up by key:
//!
//! ```yaml
//! agent_profiles:
//!   writer:
//!     display_name: Writer
//!     llm_options:
//!       model: openai/gpt-4o-mini
//!       temperature: 0.7
//!     system_prompt: You write clear prose.
//! ```

pub mod error;
pub mod model;
pub mod options;
pub mod registry;
pub mod section;

pub use error::{ErrorKind, Problem, RegistryError};
pub use model::AgentProfile;
pub use options::LlmOptions;
pub use registry::Registry;
pub use section::SectionSelector;
