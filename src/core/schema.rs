//! Structural validation of untrusted plan payloads
//!
//! The validator walks a `serde_json::Value` and builds the typed tree in
//! one pass. It stops at the first violation; a bad node anywhere rejects
//! the whole payload.

use serde_json::{Map, Value};

use super::limits::Limits;
use super::task::{ScheduledTask, Task, TaskType};
use crate::error::{PlanError, Result};

/// Validate a single task tree using default limits.
pub fn validate_task(value: &Value) -> Result<ScheduledTask> {
    SchemaValidator::default().validate_task(value)
}

/// Validate a whole plan using default limits.
pub fn validate_plan(value: &Value) -> Result<Vec<ScheduledTask>> {
    SchemaValidator::default().validate_plan(value)
}

#[derive(Debug, Clone, Copy)]
pub struct SchemaValidator {
    max_depth: usize,
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new(Limits::default())
    }
}

impl SchemaValidator {
    #[must_use]
    pub const fn new(limits: Limits) -> Self {
        Self {
            max_depth: limits.max_tree_depth,
        }
    }

    pub fn validate_task(&self, value: &Value) -> Result<ScheduledTask> {
        self.node(value, "task", 1)
    }

    /// Accepts a task object, an array of tasks, or `{"tasks": [...]}`.
    pub fn validate_plan(&self, value: &Value) -> Result<Vec<ScheduledTask>> {
        match value {
            Value::Array(items) => self.sequence(items, "tasks", 1),
            Value::Object(map) if !map.contains_key("action") && map.contains_key("tasks") => {
                match map.get("tasks") {
                    Some(Value::Array(items)) => self.sequence(items, "tasks", 1),
                    _ => Err(violation("tasks", "must be an array of tasks")),
                }
            }
            Value::Object(_) => Ok(vec![self.node(value, "task", 1)?]),
            _ => Err(violation(
                "plan",
                "must be a task object, an array of tasks, or an object with `tasks`",
            )),
        }
    }

    /// Parse JSON text, then validate it as a plan.
    pub fn parse_plan(&self, raw: &str) -> Result<Vec<ScheduledTask>> {
        let value: Value = serde_json::from_str(raw)?;
        self.validate_plan(&value)
    }

    fn sequence(&self, items: &[Value], location: &str, depth: usize) -> Result<Vec<ScheduledTask>> {
        items
            .iter()
            .enumerate()
            .map(|(idx, item)| self.node(item, &format!("{location}[{idx}]"), depth))
            .collect()
    }

    fn node(&self, value: &Value, location: &str, depth: usize) -> Result<ScheduledTask> {
        if depth > self.max_depth {
            return Err(violation(
                location,
                &format!("nesting exceeds the maximum depth of {}", self.max_depth),
            ));
        }

        let Value::Object(map) = value else {
            return Err(violation(location, "must be an object"));
        };

        let task = Task {
            action: action_field(map, location)?,
            task_type: type_field(map, location)?,
            params: params_field(map, location)?,
            config: config_field(map, location)?,
        };

        let subtasks = match map.get("subtasks") {
            None => None,
            Some(Value::Array(items)) => {
                Some(self.sequence(items, &format!("{location}.subtasks"), depth + 1)?)
            }
            Some(_) => {
                return Err(violation(
                    &format!("{location}.subtasks"),
                    "must be an array of tasks",
                ));
            }
        };

        Ok(ScheduledTask { task, subtasks })
    }
}

fn violation(location: &str, problem: &str) -> PlanError {
    PlanError::invalid_input(format!("invalid plan: {location} {problem}"))
}

fn action_field(map: &Map<String, Value>, location: &str) -> Result<String> {
    match map.get("action") {
        Some(Value::String(action)) if !action.is_empty() => Ok(action.clone()),
        Some(Value::String(_)) => Err(violation(
            &format!("{location}.action"),
            "must not be empty",
        )),
        Some(_) => Err(violation(&format!("{location}.action"), "must be a string")),
        None => Err(violation(&format!("{location}.action"), "is required")),
    }
}

fn type_field(map: &Map<String, Value>, location: &str) -> Result<TaskType> {
    let field = format!("{location}.type");
    match map.get("type") {
        Some(Value::String(raw)) => TaskType::parse(raw)
            .ok_or_else(|| violation(&field, &format!("has unknown task type `{raw}`"))),
        Some(_) => Err(violation(&field, "must be a string")),
        None => Err(violation(&field, "is required")),
    }
}

fn params_field(map: &Map<String, Value>, location: &str) -> Result<Option<Map<String, Value>>> {
    match map.get("params") {
        None => Ok(None),
        Some(Value::Object(params)) => Ok(Some(params.clone())),
        Some(_) => Err(violation(&format!("{location}.params"), "must be an object")),
    }
}

fn config_field(map: &Map<String, Value>, location: &str) -> Result<Option<Vec<String>>> {
    let Some(raw) = map.get("config") else {
        return Ok(None);
    };
    let field = format!("{location}.config");
    let Value::Array(items) = raw else {
        return Err(violation(&field, "must be an array of strings"));
    };
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| violation(&format!("{field}[{idx}]"), "must be a string"))
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use serde_json::json;

    fn tree(level_two: Value) -> Value {
        json!({
            "action": "Ship release",
            "type": "group",
            "subtasks": [
                {
                    "action": "Build",
                    "type": "group",
                    "subtasks": [level_two]
                },
                {"action": "Announce", "type": "report"}
            ]
        })
    }

    #[test]
    fn accepts_well_formed_tree() {
        let value = tree(json!({"action": "Compile", "type": "execute"}));
        let task = validate_task(&value).unwrap();
        assert_eq!(task.task.action, "Ship release");
        let children = task.subtasks.unwrap();
        assert_eq!(children.len(), 2);
        assert_eq!(
            children[0].subtasks.as_ref().unwrap()[0].task.action,
            "Compile"
        );
    }

    #[test]
    fn rejects_level_two_missing_action() {
        let value = tree(json!({"type": "execute"}));
        let err = validate_task(&value).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(
            err.message.contains("task.subtasks[0].subtasks[0].action"),
            "unexpected message: {}",
            err.message
        );
    }

    #[test]
    fn rejects_empty_action() {
        let err = validate_task(&json!({"action": "", "type": "execute"})).unwrap_err();
        assert!(err.message.contains("must not be empty"));
    }

    #[test]
    fn rejects_unknown_type() {
        let err = validate_task(&json!({"action": "x", "type": "launch"})).unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidInput);
        assert!(err.message.contains("launch"));
    }

    #[test]
    fn rejects_malformed_optional_fields() {
        let bad_params = json!({"action": "x", "type": "execute", "params": ["a"]});
        assert!(validate_task(&bad_params).is_err());

        let bad_config = json!({"action": "x", "type": "config", "config": ["a", 1]});
        let err = validate_task(&bad_config).unwrap_err();
        assert!(err.message.contains("task.config[1]"));

        let bad_subtasks = json!({"action": "x", "type": "group", "subtasks": {"a": 1}});
        assert!(validate_task(&bad_subtasks).is_err());
    }

    #[test]
    fn keeps_params_and_config() {
        let value = json!({
            "action": "Set path",
            "type": "config",
            "params": {"skill": "Build Alpha", "retries": 2},
            "config": ["project.alpha.path"],
            "extra": "ignored"
        });
        let task = validate_task(&value).unwrap();
        assert_eq!(task.task.skill_param(), Some("Build Alpha"));
        assert_eq!(task.task.config, Some(vec!["project.alpha.path".to_string()]));
        assert!(task.subtasks.is_none());
    }

    #[test]
    fn plan_accepts_three_shapes() {
        let single = json!({"action": "a", "type": "answer"});
        let array = json!([{"action": "a", "type": "answer"}, {"action": "b", "type": "report"}]);
        let wrapped = json!({"tasks": [{"action": "a", "type": "answer"}]});

        assert_eq!(validate_plan(&single).unwrap().len(), 1);
        assert_eq!(validate_plan(&array).unwrap().len(), 2);
        assert_eq!(validate_plan(&wrapped).unwrap().len(), 1);
        assert!(validate_plan(&json!("nope")).is_err());
        assert!(validate_plan(&json!({"tasks": "nope"})).is_err());
    }

    #[test]
    fn plan_reports_index_of_bad_task() {
        let array = json!([{"action": "a", "type": "answer"}, {"action": "b"}]);
        let err = validate_plan(&array).unwrap_err();
        assert!(err.message.contains("tasks[1].type"));
    }

    #[test]
    fn depth_limit_rejects_deep_nesting() {
        let mut value = json!({"action": "leaf", "type": "execute"});
        for level in 0..5 {
            value = json!({"action": format!("group {level}"), "type": "group", "subtasks": [value]});
        }
        let shallow = SchemaValidator::new(Limits {
            max_tree_depth: 3,
            ..Limits::default()
        });
        let err = shallow.validate_task(&value).unwrap_err();
        assert!(err.message.contains("maximum depth of 3"));
        assert!(validate_task(&value).is_ok());
    }

    #[test]
    fn parse_plan_classifies_bad_json() {
        let err = SchemaValidator::default().parse_plan("{not json").unwrap_err();
        assert_eq!(err.code, ErrorCode::ParseError);
    }
}
