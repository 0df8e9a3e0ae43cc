//! planfold expand - Print a skill's expanded execution lines

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::core::SkillExpander;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// Skill name (exact, case-sensitive)
    pub skill: String,
}

#[derive(Serialize)]
struct ExpandReport<'a> {
    skill: &'a str,
    lines: Vec<String>,
}

pub fn run(ctx: &AppContext, args: &ExpandArgs) -> Result<()> {
    let registry = ctx.load_registry()?;
    let lines = SkillExpander::new(&registry)
        .with_limits(ctx.limits())
        .expand_skill(&args.skill)?;

    if ctx.robot {
        let report = ExpandReport {
            skill: &args.skill,
            lines,
        };
        return emit_json(&robot_ok(report), ctx.config.robot.pretty);
    }

    let mut layout = HumanLayout::new();
    layout.title(&args.skill);
    for line in &lines {
        layout.push_line(line.clone());
    }
    emit_human(layout);
    Ok(())
}
