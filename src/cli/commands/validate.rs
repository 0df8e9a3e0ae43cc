//! planfold validate - Check a plan against the task schema

use std::path::PathBuf;

use clap::Args;
use serde::Serialize;

use super::read_plan;
use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::core::task::count_nodes;
use crate::core::{SchemaValidator, leaves};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the plan JSON file
    pub plan: PathBuf,
}

#[derive(Serialize)]
struct ValidateReport {
    plan: String,
    valid: bool,
    root_tasks: usize,
    total_tasks: usize,
    leaf_tasks: usize,
}

pub fn run(ctx: &AppContext, args: &ValidateArgs) -> Result<()> {
    let payload = read_plan(&args.plan)?;
    let tasks = SchemaValidator::new(ctx.limits()).validate_plan(&payload)?;

    let report = ValidateReport {
        plan: args.plan.display().to_string(),
        valid: true,
        root_tasks: tasks.len(),
        total_tasks: count_nodes(&tasks),
        leaf_tasks: leaves(&tasks).len(),
    };

    if ctx.robot {
        return emit_json(&robot_ok(report), ctx.config.robot.pretty);
    }

    let mut layout = HumanLayout::new();
    layout.title("Plan validation");
    layout.kv("Plan", &report.plan);
    layout.kv("Root tasks", &report.root_tasks.to_string());
    layout.kv("Total tasks", &report.total_tasks.to_string());
    layout.kv("Leaf tasks", &report.leaf_tasks.to_string());
    layout.section("Status");
    layout.bullet("OK");
    emit_human(layout);
    Ok(())
}
