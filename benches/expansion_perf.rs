//! Criterion benchmarks for skill expansion and plan resolution.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use serde_json::{Value, json};
use std::hint::black_box;

use planfold::core::{
    FlatConfig, PlanResolver, SchemaValidator, SkillDefinition, SkillExpander, SkillRegistry,
    extract_placeholders, flatten_config,
};

/// A chain `Skill 0 -> Skill 1 -> ... -> Skill n`, each adding one command.
fn chain_registry(len: usize) -> SkillRegistry {
    (0..len)
        .map(|i| {
            let mut execution = vec![format!("run step {i} --path {{project.p{i}.path}}")];
            if i + 1 < len {
                execution.push(format!("[ Skill {} ]", i + 1));
            }
            SkillDefinition::new(format!("Skill {i}"), execution)
        })
        .collect()
}

fn wide_plan(tasks: usize) -> Value {
    let subtasks: Vec<Value> = (0..tasks)
        .map(|i| {
            json!({
                "action": format!("Step {i}"),
                "type": "execute",
                "params": {"skill": "Skill 0"}
            })
        })
        .collect();
    json!({"action": "All", "type": "group", "subtasks": subtasks})
}

fn expansion_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("expansion");

    for len in [4usize, 16, 30] {
        let registry = chain_registry(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_function(format!("chain_{len}"), |b| {
            let expander = SkillExpander::new(&registry);
            b.iter(|| expander.expand_skill(black_box("Skill 0")));
        });
    }

    let registry = chain_registry(16);
    group.bench_function("referenced_skills_chain_16", |b| {
        let expander = SkillExpander::new(&registry);
        let lines = vec!["[ Skill 0 ]".to_string()];
        b.iter(|| expander.referenced_skills(black_box(&lines), &[]));
    });

    group.finish();
}

fn pipeline_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    let registry = chain_registry(8);
    let plan = wide_plan(50);
    let config = flatten_config(&json!({"project": {"p0": {"path": "/p0"}}}));

    group.bench_function("validate_plan_50", |b| {
        let validator = SchemaValidator::default();
        b.iter(|| validator.validate_plan(black_box(&plan)));
    });

    group.bench_function("resolve_plan_50", |b| {
        let resolver = PlanResolver::new(&registry, config.clone());
        b.iter(|| resolver.resolve_value(black_box(&plan)));
    });

    group.bench_function("resolve_plan_50_empty_store", |b| {
        let resolver = PlanResolver::new(&registry, FlatConfig::new());
        b.iter(|| resolver.resolve_value(black_box(&plan)));
    });

    group.bench_function("extract_placeholders", |b| {
        let line = "deploy {project.alpha.path} to {cluster.prod.host}:{cluster.prod.port}";
        b.iter(|| extract_placeholders(black_box(line)));
    });

    group.finish();
}

criterion_group!(benches, expansion_benchmarks, pipeline_benchmarks);
criterion_main!(benches);
