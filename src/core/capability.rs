//! Capability listing and provenance

use serde::{Deserialize, Serialize};

use super::task::TaskType;

/// Where a capability comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Origin {
    BuiltIn,
    UserProvided,
    Indirect,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Capability {
    pub name: String,
    pub description: String,
    pub origin: Origin,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_incomplete: Option<bool>,
}

/// Task types the orchestrator handles without any skill.
#[must_use]
pub fn builtin_capabilities() -> Vec<Capability> {
    TaskType::ALL
        .into_iter()
        .filter(|kind| !matches!(kind, TaskType::Group))
        .map(|kind| Capability {
            name: kind.as_str().to_string(),
            description: builtin_description(kind).to_string(),
            origin: Origin::BuiltIn,
            is_incomplete: None,
        })
        .collect()
}

const fn builtin_description(kind: TaskType) -> &'static str {
    match kind {
        TaskType::Config => "Read or update configuration values",
        TaskType::Schedule => "Plan and order follow-up work",
        TaskType::Execute => "Run shell commands",
        TaskType::Answer => "Answer a question directly",
        TaskType::Introspect => "List available capabilities",
        TaskType::Report => "Summarize results",
        TaskType::Define => "Offer the user a choice of options",
        TaskType::Ignore => "Skip an unsupported request",
        TaskType::Select => "Pick from presented options",
        TaskType::Discard => "Drop a pending plan",
        TaskType::Group => "Group related tasks",
    }
}
