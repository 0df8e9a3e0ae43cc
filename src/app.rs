use std::path::PathBuf;

use tracing::debug;

use crate::cli::Cli;
use crate::config::Config;
use crate::core::{FlatConfig, Limits, SkillRegistry};
use crate::error::Result;
use crate::skills::load_skills;
use crate::store::load_store;

pub struct AppContext {
    pub project_root: PathBuf,
    pub config: Config,
    pub skill_paths: Vec<PathBuf>,
    pub store_path: PathBuf,
    pub robot: bool,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let project_root = std::env::current_dir()?;
        let config = Config::load(cli.config.as_deref(), &project_root)?;

        let skill_paths = if cli.skills.is_empty() {
            config.skill_paths()
        } else {
            cli.skills.clone()
        };
        let store_path = cli.store.clone().unwrap_or_else(|| config.store_path());

        Ok(Self {
            project_root,
            config,
            skill_paths,
            store_path,
            robot: cli.robot,
            verbosity: cli.verbose,
        })
    }

    /// Load skills fresh for this resolution pass.
    pub fn load_registry(&self) -> Result<SkillRegistry> {
        let definitions = load_skills(&self.skill_paths)?;
        let registry = SkillRegistry::new(definitions);
        debug!(skills = registry.len(), "skill registry built");
        Ok(registry)
    }

    pub fn load_store(&self) -> Result<FlatConfig> {
        load_store(&self.store_path)
    }

    #[must_use]
    pub const fn limits(&self) -> Limits {
        self.config.limits()
    }
}
