//! Task tree model and classification

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::schema::validate_task;

/// Closed set of task kinds an LLM plan may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskType {
    Config,
    Schedule,
    Execute,
    Answer,
    Introspect,
    Report,
    Define,
    Ignore,
    Select,
    Discard,
    Group,
}

impl TaskType {
    pub const ALL: [Self; 11] = [
        Self::Config,
        Self::Schedule,
        Self::Execute,
        Self::Answer,
        Self::Introspect,
        Self::Report,
        Self::Define,
        Self::Ignore,
        Self::Select,
        Self::Discard,
        Self::Group,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Schedule => "schedule",
            Self::Execute => "execute",
            Self::Answer => "answer",
            Self::Introspect => "introspect",
            Self::Report => "report",
            Self::Define => "define",
            Self::Ignore => "ignore",
            Self::Select => "select",
            Self::Discard => "discard",
            Self::Group => "group",
        }
    }

    /// Exact, case-sensitive match against the wire name.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl std::fmt::Display for TaskType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single unit of planned work.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub action: String,
    #[serde(rename = "type")]
    pub task_type: TaskType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<Map<String, Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<Vec<String>>,
}

impl Task {
    pub fn new(action: impl Into<String>, task_type: TaskType) -> Self {
        Self {
            action: action.into(),
            task_type,
            params: None,
            config: None,
        }
    }

    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: Value) -> Self {
        self.params
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    /// Skill named by `params.skill`, if it is a string.
    #[must_use]
    pub fn skill_param(&self) -> Option<&str> {
        self.params.as_ref()?.get("skill")?.as_str()
    }
}

/// A task that may own an ordered sequence of sub-tasks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledTask {
    #[serde(flatten)]
    pub task: Task,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<ScheduledTask>>,
}

impl ScheduledTask {
    #[must_use]
    pub const fn leaf(task: Task) -> Self {
        Self {
            task,
            subtasks: None,
        }
    }

    #[must_use]
    pub fn group(action: impl Into<String>, subtasks: Vec<Self>) -> Self {
        Self {
            task: Task::new(action, TaskType::Group),
            subtasks: Some(subtasks),
        }
    }
}

/// Shape of a node as seen by tree walkers.
#[derive(Debug, Clone, Copy)]
pub enum TaskNode<'a> {
    Leaf(&'a Task),
    Group(&'a [ScheduledTask]),
}

/// True if the task carries `subtasks` or is typed `group`.
#[must_use]
pub const fn is_group(task: &ScheduledTask) -> bool {
    task.subtasks.is_some() || matches!(task.task.task_type, TaskType::Group)
}

/// Structural re-check of an untyped value, same rules as the validator.
#[must_use]
pub fn is_task(value: &Value) -> bool {
    validate_task(value).is_ok()
}

#[must_use]
pub fn classify(task: &ScheduledTask) -> TaskNode<'_> {
    if is_group(task) {
        TaskNode::Group(task.subtasks.as_deref().unwrap_or_default())
    } else {
        TaskNode::Leaf(&task.task)
    }
}

/// Leaf tasks in depth-first, left-to-right order. Empty groups are skipped.
#[must_use]
pub fn leaves(tasks: &[ScheduledTask]) -> Vec<&Task> {
    let mut out = Vec::new();
    collect_leaves(tasks, &mut out);
    out
}

fn collect_leaves<'a>(tasks: &'a [ScheduledTask], out: &mut Vec<&'a Task>) {
    for task in tasks {
        match classify(task) {
            TaskNode::Leaf(leaf) => out.push(leaf),
            TaskNode::Group(children) => collect_leaves(children, out),
        }
    }
}

/// Total number of nodes, groups included.
#[must_use]
pub fn count_nodes(tasks: &[ScheduledTask]) -> usize {
    tasks
        .iter()
        .map(|task| 1 + task.subtasks.as_deref().map_or(0, count_nodes))
        .sum()
}
