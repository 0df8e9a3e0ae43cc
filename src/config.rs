use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::Limits;
use crate::core::limits::{
    DEFAULT_MAX_EXPANDED_LINES, DEFAULT_MAX_EXPANSION_DEPTH, DEFAULT_MAX_TREE_DEPTH,
};
use crate::error::{PlanError, Result};

pub const CONFIG_ENV: &str = "PLANFOLD_CONFIG";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub skills: SkillsConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub robot: RobotConfig,
}

impl Config {
    /// Layer defaults, then either the explicit file alone or the global
    /// and project files, then `PLANFOLD_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

        if let Some(path) = explicit {
            if let Some(patch) = Self::load_patch(&path)? {
                config.merge_patch(patch);
            }
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_project(project_root)? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;

        Ok(config)
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        match dirs::config_dir() {
            Some(dir) => Self::load_patch(&dir.join("planfold/config.toml")),
            None => Ok(None),
        }
    }

    fn load_project(project_root: &Path) -> Result<Option<ConfigPatch>> {
        Self::load_patch(&project_root.join(".planfold/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path).map_err(|err| {
            PlanError::file_read(format!("read config {}: {err}", path.display()))
        })?;
        let patch = toml::from_str(&raw).map_err(|err| {
            PlanError::parse(format!("parse config {}: {err}", path.display()))
        })?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.skills {
            self.skills.merge(patch);
        }
        if let Some(patch) = patch.store {
            self.store.merge(patch);
        }
        if let Some(patch) = patch.limits {
            self.limits.merge(patch);
        }
        if let Some(patch) = patch.robot {
            self.robot.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(values) = parse_list(var("PLANFOLD_SKILL_PATHS")) {
            self.skills.paths = merge_unique(values, &self.skills.paths);
        }
        if let Some(value) = var("PLANFOLD_STORE_PATH") {
            self.store.path = value;
        }
        if let Some(value) = parse_usize("PLANFOLD_MAX_TREE_DEPTH", var("PLANFOLD_MAX_TREE_DEPTH"))? {
            self.limits.max_tree_depth = value;
        }
        if let Some(value) =
            parse_usize("PLANFOLD_MAX_EXPANSION_DEPTH", var("PLANFOLD_MAX_EXPANSION_DEPTH"))?
        {
            self.limits.max_expansion_depth = value;
        }
        if let Some(value) =
            parse_usize("PLANFOLD_MAX_EXPANDED_LINES", var("PLANFOLD_MAX_EXPANDED_LINES"))?
        {
            self.limits.max_expanded_lines = value;
        }
        if let Some(value) = parse_bool(var("PLANFOLD_ROBOT_PRETTY")) {
            self.robot.pretty = value;
        }
        Ok(())
    }

    #[must_use]
    pub fn skill_paths(&self) -> Vec<PathBuf> {
        self.skills.paths.iter().map(|raw| expand_home(raw)).collect()
    }

    #[must_use]
    pub fn store_path(&self) -> PathBuf {
        expand_home(&self.store.path)
    }

    #[must_use]
    pub const fn limits(&self) -> Limits {
        Limits {
            max_tree_depth: self.limits.max_tree_depth,
            max_expansion_depth: self.limits.max_expansion_depth,
            max_expanded_lines: self.limits.max_expanded_lines,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsConfig {
    #[serde(default)]
    pub paths: Vec<String>,
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            paths: vec![
                "~/.config/planfold/skills".to_string(),
                ".planfold/skills".to_string(),
            ],
        }
    }
}

impl SkillsConfig {
    fn merge(&mut self, patch: SkillsPatch) {
        if let Some(values) = patch.paths {
            self.paths = merge_unique(values, &self.paths);
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub path: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: "~/.config/planfold/store.yaml".to_string(),
        }
    }
}

impl StoreConfig {
    fn merge(&mut self, patch: StorePatch) {
        if let Some(value) = patch.path {
            self.path = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    pub max_tree_depth: usize,
    pub max_expansion_depth: usize,
    pub max_expanded_lines: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_tree_depth: DEFAULT_MAX_TREE_DEPTH,
            max_expansion_depth: DEFAULT_MAX_EXPANSION_DEPTH,
            max_expanded_lines: DEFAULT_MAX_EXPANDED_LINES,
        }
    }
}

impl LimitsConfig {
    fn merge(&mut self, patch: LimitsPatch) {
        if let Some(value) = patch.max_tree_depth {
            self.max_tree_depth = value;
        }
        if let Some(value) = patch.max_expansion_depth {
            self.max_expansion_depth = value;
        }
        if let Some(value) = patch.max_expanded_lines {
            self.max_expanded_lines = value;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RobotConfig {
    #[serde(default)]
    pub pretty: bool,
}

impl RobotConfig {
    fn merge(&mut self, patch: RobotPatch) {
        if let Some(value) = patch.pretty {
            self.pretty = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub skills: Option<SkillsPatch>,
    pub store: Option<StorePatch>,
    pub limits: Option<LimitsPatch>,
    pub robot: Option<RobotPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SkillsPatch {
    pub paths: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct StorePatch {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct LimitsPatch {
    pub max_tree_depth: Option<usize>,
    pub max_expansion_depth: Option<usize>,
    pub max_expanded_lines: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RobotPatch {
    pub pretty: Option<bool>,
}

/// Append `values` after `existing`. A value already present moves to the
/// end, so the latest layer loads last and wins skill name clashes.
fn merge_unique(values: Vec<String>, existing: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut out: Vec<String> = values
        .into_iter()
        .rev()
        .filter(|value| seen.insert(value.clone()))
        .collect();
    out.extend(
        existing
            .iter()
            .rev()
            .filter(|value| seen.insert((*value).clone()))
            .cloned(),
    );
    out.reverse();
    out
}

fn expand_home(raw: &str) -> PathBuf {
    if let Some(rest) = raw.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(raw)
}

fn parse_bool(value: Option<String>) -> Option<bool> {
    value.map(|value| matches!(value.to_lowercase().as_str(), "1" | "true" | "yes" | "on"))
}

fn parse_usize(key: &str, value: Option<String>) -> Result<Option<usize>> {
    match value {
        Some(value) => value.trim().parse::<usize>().map(Some).map_err(|err| {
            PlanError::invalid_input(format!("invalid {key} value {value}: {err}"))
        }),
        None => Ok(None),
    }
}

fn parse_list(value: Option<String>) -> Option<Vec<String>> {
    value.map(|value| {
        value
            .split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(str::to_string)
            .collect()
    })
}
