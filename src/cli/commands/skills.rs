//! planfold skills - List and check loaded skills

use clap::{Args, Subcommand};
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::core::{
    Capability, Origin, SkillExpander, builtin_capabilities, validate_no_cycles,
};
use crate::error::{ErrorCode, PlanError, Result};

#[derive(Args, Debug)]
pub struct SkillsArgs {
    #[command(subcommand)]
    pub command: SkillsCommand,
}

#[derive(Subcommand, Debug)]
pub enum SkillsCommand {
    /// List skills as capabilities
    List {
        /// Also list the built-in task capabilities
        #[arg(long)]
        builtin: bool,
    },

    /// Report cycles and unknown references across all skills
    Check,
}

pub fn run(ctx: &AppContext, args: &SkillsArgs) -> Result<()> {
    match &args.command {
        SkillsCommand::List { builtin } => list(ctx, *builtin),
        SkillsCommand::Check => check(ctx),
    }
}

fn list(ctx: &AppContext, builtin: bool) -> Result<()> {
    let registry = ctx.load_registry()?;
    let mut capabilities = registry.capabilities();
    if builtin {
        capabilities.extend(builtin_capabilities());
    }

    if ctx.robot {
        return emit_json(&robot_ok(capabilities), ctx.config.robot.pretty);
    }

    let mut layout = HumanLayout::new();
    layout.title("Skills");
    layout.kv("Loaded", &registry.len().to_string());
    layout.section("Capabilities");
    for capability in &capabilities {
        layout.bullet(&describe(capability));
    }
    emit_human(layout);
    Ok(())
}

fn describe(capability: &Capability) -> String {
    let origin = match capability.origin {
        Origin::BuiltIn => "built-in",
        Origin::UserProvided => "user",
        Origin::Indirect => "indirect",
    };
    let mut line = format!("{} ({origin})", capability.name);
    if capability.is_incomplete == Some(true) {
        line.push_str(" [incomplete]");
    }
    if !capability.description.is_empty() {
        line.push_str(&format!(": {}", capability.description));
    }
    line
}

#[derive(Serialize)]
struct CheckReport {
    skills: usize,
    problems: Vec<PlanError>,
}

fn check(ctx: &AppContext) -> Result<()> {
    let registry = ctx.load_registry()?;
    let expander = SkillExpander::new(&registry).with_limits(ctx.limits());

    let mut problems = validate_no_cycles(&registry, ctx.limits());
    problems.extend(
        registry
            .names()
            .into_iter()
            .filter_map(|name| expander.expand_skill(name).err())
            .filter(|err| err.code != ErrorCode::CircularReference),
    );

    let report = CheckReport {
        skills: registry.len(),
        problems,
    };

    if ctx.robot {
        emit_json(&robot_ok(&report), ctx.config.robot.pretty)?;
    } else {
        let mut layout = HumanLayout::new();
        layout.title("Skill check");
        layout.kv("Skills", &report.skills.to_string());
        layout.section("Status");
        if report.problems.is_empty() {
            layout.bullet("OK");
        }
        for problem in &report.problems {
            layout.bullet(&format!("{}: {}", problem.code, problem.message));
        }
        emit_human(layout);
    }

    match report.problems.first() {
        None => Ok(()),
        Some(first) => Err(PlanError::new(
            first.code,
            format!("skill check found {} problem(s)", report.problems.len()),
        )),
    }
}
