//! planfold refs - Skills transitively referenced by a skill or plan

use std::path::Path;

use clap::Args;
use serde::Serialize;

use super::read_plan;
use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::core::{SchemaValidator, SkillExpander, leaves, render_skill_docs};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct RefsArgs {
    /// Skill name, or path to a plan JSON file
    pub target: String,

    /// Include each referenced skill's description and steps
    #[arg(long)]
    pub docs: bool,
}

#[derive(Serialize)]
struct RefsReport {
    target: String,
    skills: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    docs: Option<String>,
}

pub fn run(ctx: &AppContext, args: &RefsArgs) -> Result<()> {
    let registry = ctx.load_registry()?;
    let lines = seed_lines(ctx, &args.target)?;

    let found = SkillExpander::new(&registry)
        .with_limits(ctx.limits())
        .referenced_skills(&lines, &[]);
    let docs = args.docs.then(|| render_skill_docs(&found, &registry));

    if ctx.robot {
        let report = RefsReport {
            target: args.target.clone(),
            skills: found.into_iter().collect(),
            docs,
        };
        return emit_json(&robot_ok(report), ctx.config.robot.pretty);
    }

    let mut layout = HumanLayout::new();
    layout.title("Referenced skills");
    layout.kv("Target", &args.target);
    layout.kv("Count", &found.len().to_string());
    layout.section("Skills");
    for name in &found {
        layout.bullet(name);
    }
    if let Some(docs) = docs {
        layout.section("Documentation");
        layout.push_line(docs.trim_end().to_string());
    }
    emit_human(layout);
    Ok(())
}

/// Reference lines to start the closure from. A plan contributes each leaf
/// action plus a reference for every `params.skill`.
fn seed_lines(ctx: &AppContext, target: &str) -> Result<Vec<String>> {
    let path = Path::new(target);
    if !(path.is_file() && path.extension().is_some_and(|ext| ext == "json")) {
        return Ok(vec![format!("[ {target} ]")]);
    }

    let payload = read_plan(path)?;
    let tasks = SchemaValidator::new(ctx.limits()).validate_plan(&payload)?;
    let mut lines = Vec::new();
    for task in leaves(&tasks) {
        lines.push(task.action.clone());
        if let Some(skill) = task.skill_param() {
            lines.push(format!("[ {skill} ]"));
        }
    }
    Ok(lines)
}
