//! Configuration requirement discovery
//!
//! Actions and expanded commands may carry `{dot.delimited.path}`
//! placeholders. Each placeholder must resolve against the user's flattened
//! configuration before the plan can run.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use super::expansion::SkillExpander;
use super::limits::Limits;
use super::registry::SkillRegistry;
use super::task::Task;
use crate::error::PlanError;

/// Configuration flattened to dot-notation keys.
pub type FlatConfig = BTreeMap<String, Value>;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{([A-Za-z0-9_-]+(?:\.[A-Za-z0-9_-]+)+)\}").expect("placeholder pattern is valid")
});

/// One configuration value the plan needs but the store lacks.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct ConfigRequirement {
    pub path: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ConfigRequirement {
    pub fn string(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: "string".to_string(),
        }
    }
}

impl PartialEq for ConfigRequirement {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl std::hash::Hash for ConfigRequirement {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequirementReport {
    pub missing_config: Vec<ConfigRequirement>,
    pub validation_errors: Vec<PlanError>,
}

/// Placeholder paths in `text`, in order of appearance (duplicates kept).
#[must_use]
pub fn extract_placeholders(text: &str) -> Vec<&str> {
    PLACEHOLDER
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|path| path.as_str())
        .collect()
}

/// Flatten nested objects into dot-joined keys. Arrays and scalars are
/// leaves; empty objects contribute nothing.
#[must_use]
pub fn flatten_config(value: &Value) -> FlatConfig {
    let mut out = FlatConfig::new();
    if let Value::Object(map) = value {
        for (key, child) in map {
            flatten_into(key, child, &mut out);
        }
    }
    out
}

fn flatten_into(prefix: &str, value: &Value, out: &mut FlatConfig) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                flatten_into(&format!("{prefix}.{key}"), child, out);
            }
        }
        other => {
            out.insert(prefix.to_string(), other.clone());
        }
    }
}

/// True when `path` is a flattened key with a non-null, non-empty value.
/// An object path such as `project.alpha` is never a key, so it is absent.
#[must_use]
pub fn has_config_value(config: &FlatConfig, path: &str) -> bool {
    match config.get(path) {
        None | Some(Value::Null) => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(_) => true,
    }
}

pub struct RequirementResolver<'a> {
    registry: &'a SkillRegistry,
    config: &'a FlatConfig,
    limits: Limits,
}

impl<'a> RequirementResolver<'a> {
    #[must_use]
    pub fn new(registry: &'a SkillRegistry, config: &'a FlatConfig) -> Self {
        Self {
            registry,
            config,
            limits: Limits::default(),
        }
    }

    #[must_use]
    pub const fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    /// Scan each task's action and, when `params.skill` names a registered
    /// skill, that skill's expanded lines.
    #[must_use]
    pub fn resolve(&self, tasks: &[Task]) -> RequirementReport {
        let expander = SkillExpander::new(self.registry).with_limits(self.limits);
        let mut report = RequirementReport::default();
        let mut seen = HashSet::new();

        for task in tasks {
            self.scan(&task.action, &mut seen, &mut report);

            let Some(skill) = task.skill_param() else {
                continue;
            };
            if self.registry.lookup(skill).is_none() {
                debug!(skill, action = %task.action, "unknown skill in task params, scanning action only");
                continue;
            }
            match expander.expand_skill(skill) {
                Ok(lines) => {
                    for line in &lines {
                        self.scan(line, &mut seen, &mut report);
                    }
                }
                Err(err) => {
                    warn!(skill, code = %err.code, "skill expansion failed during requirement scan");
                    report.validation_errors.push(err);
                }
            }
        }

        report
    }

    /// Scan already-expanded lines.
    #[must_use]
    pub fn resolve_lines<'l, I>(&self, lines: I) -> RequirementReport
    where
        I: IntoIterator<Item = &'l str>,
    {
        let mut report = RequirementReport::default();
        let mut seen = HashSet::new();
        for line in lines {
            self.scan(line, &mut seen, &mut report);
        }
        report
    }

    fn scan(&self, text: &str, seen: &mut HashSet<String>, report: &mut RequirementReport) {
        for path in extract_placeholders(text) {
            if !seen.insert(path.to_string()) {
                continue;
            }
            if !has_config_value(self.config, path) {
                report.missing_config.push(ConfigRequirement::string(path));
            }
        }
    }
}
