use serde_json::{Value, json};

use planfold::ErrorCode;
use planfold::core::{
    FlatConfig, PlanResolver, RequirementResolver, SkillDefinition, SkillRegistry, TaskNode,
    classify, flatten_config, is_group, is_task, validate_plan,
};
use planfold::skills::load_skills;
use planfold::store::load_store;
use planfold::test_utils::fixtures::UnitTestFixture;
use planfold::test_utils::{TestCase, run_table_tests};

fn registry() -> SkillRegistry {
    SkillRegistry::new(vec![
        SkillDefinition::new("Deploy", ["[ Build ]", "scp out {server.prod.host}:/srv"]),
        SkillDefinition::new("Build", ["cd {project.path.root}", "make"]),
        SkillDefinition::new("Ping", ["[ Pong ]"]),
        SkillDefinition::new("Pong", ["[ Ping ]"]),
        SkillDefinition::new("Broken", ["[ Missing ]"]),
    ])
}

/// Resolve a plan and reduce the outcome to the error code or the missing paths.
fn outcome(plan: Value) -> Result<Vec<String>, ErrorCode> {
    let config = flatten_config(&json!({"project": {"path": {"root": "/src"}}}));
    PlanResolver::new(&registry(), config)
        .resolve_value(&plan)
        .map(|resolved| resolved.missing_config.into_iter().map(|r| r.path).collect())
        .map_err(|err| err.code)
}

#[test]
fn pipeline_outcomes() {
    let cases = vec![
        TestCase {
            name: "skill chain with one missing value",
            input: json!({"action": "ship", "type": "execute", "params": {"skill": "Deploy"}}),
            expected: Ok(vec!["server.prod.host".to_string()]),
        },
        TestCase {
            name: "plain action is scanned",
            input: json!([{"action": "open {editor.cmd.path}", "type": "execute"}]),
            expected: Ok(vec!["editor.cmd.path".to_string()]),
        },
        TestCase {
            name: "non-leaf types are still steps",
            input: json!({"tasks": [{"action": "What is up?", "type": "answer"}]}),
            expected: Ok(vec![]),
        },
        TestCase {
            name: "mutual recursion",
            input: json!({"action": "p", "type": "execute", "params": {"skill": "Ping"}}),
            expected: Err(ErrorCode::CircularReference),
        },
        TestCase {
            name: "dangling reference",
            input: json!({"action": "b", "type": "execute", "params": {"skill": "Broken"}}),
            expected: Err(ErrorCode::SkillNotFound),
        },
        TestCase {
            name: "reference in action",
            input: json!({"action": "[ Nowhere ]", "type": "execute"}),
            expected: Err(ErrorCode::SkillNotFound),
        },
        TestCase {
            name: "invalid type",
            input: json!({"action": "x", "type": "Execute"}),
            expected: Err(ErrorCode::InvalidInput),
        },
        TestCase {
            name: "scalar payload",
            input: json!(42),
            expected: Err(ErrorCode::InvalidInput),
        },
    ];

    run_table_tests(cases, outcome).unwrap();
}

#[test]
fn requirement_resolver_collects_errors_instead_of_failing() {
    let registry = registry();
    let config = FlatConfig::new();
    let tasks: Vec<_> = validate_plan(&json!([
        {"action": "a", "type": "execute", "params": {"skill": "Deploy"}},
        {"action": "b", "type": "execute", "params": {"skill": "Ping"}},
        {"action": "c", "type": "execute", "params": {"skill": "Unknown"}}
    ]))
    .unwrap()
    .into_iter()
    .map(|scheduled| scheduled.task)
    .collect();

    let report = RequirementResolver::new(&registry, &config).resolve(&tasks);
    let paths: Vec<&str> = report.missing_config.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(paths, vec!["project.path.root", "server.prod.host"]);
    assert_eq!(report.validation_errors.len(), 1);
    assert_eq!(report.validation_errors[0].code, ErrorCode::CircularReference);
}

#[test]
fn classification_helpers_agree_with_validator() {
    let group = json!({"action": "g", "type": "group", "subtasks": []});
    let leaf = json!({"action": "l", "type": "report"});
    let bad = json!({"action": "l", "type": "nope"});

    assert!(is_task(&leaf));
    assert!(is_task(&group));
    assert!(!is_task(&bad));

    let tree = validate_plan(&json!([group, leaf])).unwrap();
    assert!(is_group(&tree[0]));
    assert!(!is_group(&tree[1]));
    assert!(matches!(classify(&tree[0]), TaskNode::Group(children) if children.is_empty()));
    assert!(matches!(classify(&tree[1]), TaskNode::Leaf(task) if task.action == "l"));
}

#[test]
fn files_on_disk_resolve_end_to_end() {
    let fixture = UnitTestFixture::new();
    let _ = fixture.create_skill(
        "deploy",
        "# Deploy\n## Execution\n- [ Build ]\n- rsync out/ {server.prod.host}:/srv\n",
    );
    let _ = fixture.create_skill("build", "# Build\n## Execution\n- make -C {project.path.root}\n");
    let store = fixture.create_file("store.toml", "[server.prod]\nhost = \"prod-1\"\n");
    let plan = fixture.create_plan(
        "ship",
        &json!({"action": "Ship it", "type": "execute", "params": {"skill": "Deploy"}}),
    );

    let registry = SkillRegistry::new(load_skills(&[fixture.skills_dir()]).unwrap());
    let raw = std::fs::read_to_string(plan).unwrap();
    let resolved = PlanResolver::new(&registry, load_store(&store).unwrap())
        .resolve_str(&raw)
        .unwrap();

    assert_eq!(
        resolved.expanded_lines,
        vec!["make -C {project.path.root}", "rsync out/ {server.prod.host}:/srv"]
    );
    let missing: Vec<&str> = resolved.missing_config.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(missing, vec!["project.path.root"]);
}
