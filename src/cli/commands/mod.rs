//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use std::path::Path;

use clap::Subcommand;
use serde_json::Value;

pub mod expand;
pub mod refs;
pub mod resolve;
pub mod skills;
pub mod validate;

use crate::app::AppContext;
use crate::error::{PlanError, Result};

pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Validate(args) => validate::run(ctx, args),
        Commands::Resolve(args) => resolve::run(ctx, args),
        Commands::Expand(args) => expand::run(ctx, args),
        Commands::Refs(args) => refs::run(ctx, args),
        Commands::Skills(args) => skills::run(ctx, args),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check a plan file against the task schema
    Validate(validate::ValidateArgs),

    /// Flatten a plan into execution steps and report missing configuration
    Resolve(resolve::ResolveArgs),

    /// Print the fully expanded execution lines of a skill
    Expand(expand::ExpandArgs),

    /// List skills transitively referenced by a skill or plan
    Refs(refs::RefsArgs),

    /// Inspect the loaded skills
    Skills(skills::SkillsArgs),
}

/// Read and parse a plan file as untyped JSON.
pub(crate) fn read_plan(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .map_err(|err| PlanError::file_read(format!("read plan {}: {err}", path.display())))?;
    serde_json::from_str(&raw).map_err(|err| {
        PlanError::parse(format!("parse plan {}: {err}", path.display()))
    })
}
