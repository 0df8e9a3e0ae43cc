//! Command-line interface

use std::path::PathBuf;

use clap::Parser;

pub mod commands;
pub mod output;

pub use commands::Commands;

#[derive(Parser, Debug)]
#[command(
    name = "planfold",
    version,
    about = "Validate task plans, expand skill references, and report missing configuration"
)]
pub struct Cli {
    /// Emit JSON for machine consumption
    #[arg(long, global = true, env = "PLANFOLD_ROBOT")]
    pub robot: bool,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Disable logging
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Config file to use instead of the global and project files
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Skill directory or file (repeatable, replaces configured paths)
    #[arg(long = "skills", global = true)]
    pub skills: Vec<PathBuf>,

    /// Configuration store file (.yaml, .toml or .json)
    #[arg(long, global = true)]
    pub store: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
