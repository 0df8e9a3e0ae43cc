//! Skill discovery on disk

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::parser::parse_skill_markdown;
use crate::core::SkillDefinition;
use crate::error::{PlanError, Result};

#[must_use]
pub fn is_skill_file(path: &Path) -> bool {
    matches!(path.extension().and_then(|ext| ext.to_str()), Some("md"))
}

/// Load every skill under `paths`, in path order. Files inside a directory
/// are visited in name order so later files override earlier ones
/// deterministically. Missing paths are skipped.
pub fn load_skills(paths: &[PathBuf]) -> Result<Vec<SkillDefinition>> {
    let mut skills = Vec::new();
    for path in paths {
        if path.is_file() {
            if is_skill_file(path) {
                skills.extend(load_file(path)?);
            }
            continue;
        }

        if !path.is_dir() {
            debug!(path = %path.display(), "skill path does not exist, skipping");
            continue;
        }

        for entry in WalkDir::new(path)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_map(std::result::Result::ok)
        {
            let entry_path = entry.path();
            if entry_path.is_file() && is_skill_file(entry_path) {
                skills.extend(load_file(entry_path)?);
            }
        }
    }
    debug!(count = skills.len(), "loaded skills");
    Ok(skills)
}

fn load_file(path: &Path) -> Result<Vec<SkillDefinition>> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        PlanError::file_read(format!("read skill {}: {err}", path.display()))
    })?;
    parse_skill_markdown(&content, path)
}
