//! Plan resolution pipeline
//!
//! payload → schema validation → leaf walk → skill expansion →
//! requirement scan → [`ResolvedPlan`].

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use super::expansion::SkillExpander;
use super::limits::Limits;
use super::registry::SkillRegistry;
use super::requirements::{ConfigRequirement, FlatConfig, RequirementResolver};
use super::schema::SchemaValidator;
use super::task::{ScheduledTask, Task, TaskType, count_nodes, leaves};
use crate::error::{PlanError, Result};

/// A leaf task with its fully expanded command lines.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExecutionStep {
    pub action: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
    pub commands: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedPlan {
    pub steps: Vec<ExecutionStep>,
    /// Every step's commands, in execution order.
    pub expanded_lines: Vec<String>,
    pub missing_config: Vec<ConfigRequirement>,
    pub task_count: usize,
}

impl ResolvedPlan {
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.missing_config.is_empty()
    }
}

pub struct PlanResolver<'a> {
    registry: &'a SkillRegistry,
    config: FlatConfig,
    limits: Limits,
}

impl<'a> PlanResolver<'a> {
    #[must_use]
    pub fn new(registry: &'a SkillRegistry, config: FlatConfig) -> Self {
        Self {
            registry,
            config,
            limits: Limits::default(),
        }
    }

    #[must_use]
    pub fn with_limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn resolve_str(&self, raw: &str) -> Result<ResolvedPlan> {
        let value: Value = serde_json::from_str(raw)?;
        self.resolve_value(&value)
    }

    pub fn resolve_value(&self, payload: &Value) -> Result<ResolvedPlan> {
        let tasks = SchemaValidator::new(self.limits).validate_plan(payload)?;
        self.resolve_tasks(&tasks)
    }

    /// Resolve an already validated tree.
    pub fn resolve_tasks(&self, tasks: &[ScheduledTask]) -> Result<ResolvedPlan> {
        let expander = SkillExpander::new(self.registry).with_limits(self.limits);

        let steps = leaves(tasks)
            .into_iter()
            .map(|task| self.step_for(&expander, task))
            .collect::<Result<Vec<_>>>()?;

        let scanned = steps.iter().flat_map(|step| {
            std::iter::once(step.action.as_str()).chain(step.commands.iter().map(String::as_str))
        });
        let report = RequirementResolver::new(self.registry, &self.config)
            .with_limits(self.limits)
            .resolve_lines(scanned);

        info!(
            steps = steps.len(),
            missing = report.missing_config.len(),
            "plan resolved"
        );

        let expanded_lines = steps
            .iter()
            .flat_map(|step| step.commands.iter().cloned())
            .collect();

        Ok(ResolvedPlan {
            steps,
            expanded_lines,
            missing_config: report.missing_config,
            task_count: count_nodes(tasks),
        })
    }

    fn step_for(&self, expander: &SkillExpander<'_, SkillRegistry>, task: &Task) -> Result<ExecutionStep> {
        let expanded = match task.skill_param() {
            Some(skill) if self.registry.lookup(skill).is_some() => {
                debug!(skill, action = %task.action, "expanding task skill");
                expander.expand_skill(skill)
            }
            Some(skill) => {
                warn!(skill, action = %task.action, "task names an unknown skill, using its action");
                expander.expand(std::slice::from_ref(&task.action), &[])
            }
            None => expander.expand(std::slice::from_ref(&task.action), &[]),
        };

        let commands = expanded.map_err(|err| {
            PlanError::new(err.code, format!("Cannot expand task `{}`: {}", task.action, err.message))
                .with_cause(err)
        })?;

        Ok(ExecutionStep {
            action: task.action.clone(),
            task_type: task.task_type,
            params: task.params.clone(),
            commands,
        })
    }
}
