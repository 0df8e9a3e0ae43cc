//! planfold resolve - Flatten a plan and report missing configuration

use std::path::PathBuf;

use clap::Args;
use itertools::Itertools;

use super::read_plan;
use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_incomplete, robot_ok};
use crate::core::PlanResolver;
use crate::error::{PlanError, Result};

#[derive(Args, Debug)]
pub struct ResolveArgs {
    /// Path to the plan JSON file
    pub plan: PathBuf,

    /// Fail when any configuration value is missing
    #[arg(long)]
    pub strict: bool,
}

pub fn run(ctx: &AppContext, args: &ResolveArgs) -> Result<()> {
    let payload = read_plan(&args.plan)?;
    let registry = ctx.load_registry()?;
    let store = ctx.load_store()?;

    let resolved = PlanResolver::new(&registry, store)
        .with_limits(ctx.limits())
        .resolve_value(&payload)?;
    let missing = resolved.missing_config.len();
    let missing_paths = resolved
        .missing_config
        .iter()
        .map(|req| req.path.as_str())
        .join(", ");

    if ctx.robot {
        let response = if resolved.is_ready() {
            robot_ok(&resolved)
        } else {
            robot_incomplete(&resolved, missing)
        };
        emit_json(&response, ctx.config.robot.pretty)?;
    } else {
        let mut layout = HumanLayout::new();
        layout.title("Resolved plan");
        layout.kv("Plan", &args.plan.display().to_string());
        layout.kv("Tasks", &resolved.task_count.to_string());
        layout.kv("Steps", &resolved.steps.len().to_string());

        layout.section("Steps");
        for (idx, step) in resolved.steps.iter().enumerate() {
            layout.push_line(format!("{}. [{}] {}", idx + 1, step.task_type, step.action));
            for command in &step.commands {
                layout.push_line(format!("     $ {command}"));
            }
        }

        layout.section("Configuration");
        if resolved.is_ready() {
            layout.bullet("All required values are present");
        } else {
            for requirement in &resolved.missing_config {
                layout.bullet(&format!("missing {} ({})", requirement.path, requirement.kind));
            }
        }
        emit_human(layout);
    }

    if args.strict && !resolved.is_ready() {
        return Err(PlanError::missing_config(format!(
            "{missing} configuration value(s) missing: {missing_paths}"
        )));
    }
    Ok(())
}
