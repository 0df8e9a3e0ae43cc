use proptest::prelude::*;
use serde_json::{Value, json};

use planfold::core::{TaskType, validate_plan, validate_task};

fn arb_json() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|n| json!(n)),
        "[a-z]{0,8}".prop_map(Value::String),
        prop::sample::select(TaskType::ALL.to_vec()).prop_map(|t| json!(t.as_str())),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(
                prop::sample::select(vec!["action", "type", "params", "config", "subtasks", "tasks", "extra"]),
                inner,
                0..5,
            )
            .prop_map(|map| {
                Value::Object(map.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
            }),
        ]
    })
}

proptest! {
    #[test]
    fn test_validator_never_panics(value in arb_json()) {
        let _ = validate_task(&value);
        let _ = validate_plan(&value);
    }

    #[test]
    fn test_valid_leaf_always_accepted(action in ".{1,32}", kind in prop::sample::select(TaskType::ALL.to_vec())) {
        prop_assume!(kind != TaskType::Group);
        let value = json!({"action": action, "type": kind.as_str()});
        let task = validate_task(&value).unwrap();
        prop_assert_eq!(task.task.task_type, kind);
        prop_assert!(task.subtasks.is_none());
    }

    #[test]
    fn test_unknown_type_always_rejected(kind in "[a-z]{1,12}") {
        prop_assume!(TaskType::parse(&kind).is_none());
        let value = json!({"action": "x", "type": kind});
        prop_assert!(validate_task(&value).is_err());
    }
}
