//! Workflow action registry and configuration model.
//!
//! `identifier` maps action names to versioned identifiers per rollout tier;
//! `definition` and `configuration` describe a single action as it appears in
//! a workflow document.

pub mod configuration;
pub mod definition;
pub mod identifier;
pub mod payload;

pub use configuration::{ActionConfiguration, ActionKind};
pub use definition::ActionDefinition;
pub use identifier::{resolve, resolve_default, Tier};
pub use payload::convert_payload_to_text;
