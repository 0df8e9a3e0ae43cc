//! Skill markdown parsing
//!
//! ```markdown
//! # Build Alpha
//!
//! ## Description
//! Build the alpha project.
//!
//! ## Steps
//! - Enter the project directory
//! - Compile
//!
//! ## Execution
//! - cd {project.alpha.path}
//! - [ Compile ]
//! ```
//!
//! Each `# ` heading starts a new skill. A file without any heading holds
//! one skill named after the file stem.

use std::path::Path;

use crate::core::SkillDefinition;
use crate::error::{PlanError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Description,
    Steps,
    Execution,
    Other,
}

impl Section {
    fn from_title(title: &str) -> Self {
        match title.trim().to_lowercase().as_str() {
            "description" => Self::Description,
            "steps" => Self::Steps,
            "execution" => Self::Execution,
            _ => Self::Other,
        }
    }
}

/// Parse every skill defined in `content`.
pub fn parse_skill_markdown(content: &str, source: &Path) -> Result<Vec<SkillDefinition>> {
    let mut skills = Vec::new();
    let mut current: Option<SkillDefinition> = None;
    let mut section = Section::Preamble;
    let mut description_lines: Vec<String> = Vec::new();
    let mut in_fence = false;

    for line in content.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with("```") {
            in_fence = !in_fence;
            continue;
        }
        if in_fence {
            continue;
        }

        if let Some(title) = line.strip_prefix("# ") {
            if let Some(skill) = current.take() {
                skills.push(finish(skill, &mut description_lines));
            }
            let name = title.trim();
            if name.is_empty() {
                return Err(PlanError::parse(format!(
                    "empty skill title in {}",
                    source.display()
                )));
            }
            current = Some(SkillDefinition {
                name: name.to_string(),
                ..SkillDefinition::default()
            });
            section = Section::Preamble;
            continue;
        }

        if let Some(title) = line.strip_prefix("## ") {
            if current.is_none() && skills.is_empty() {
                current = Some(untitled(source)?);
            }
            section = Section::from_title(title);
            continue;
        }

        let Some(skill) = current.as_mut() else {
            continue;
        };
        if trimmed.is_empty() {
            continue;
        }

        match section {
            Section::Description | Section::Preamble => {
                description_lines.push(trimmed.to_string());
            }
            Section::Steps => {
                if let Some(item) = list_item(trimmed) {
                    skill.steps.push(item.to_string());
                }
            }
            Section::Execution => {
                if let Some(item) = list_item(trimmed) {
                    skill.execution.push(item.to_string());
                }
            }
            Section::Other => {}
        }
    }

    if in_fence {
        return Err(PlanError::parse(format!(
            "unterminated code fence in {}",
            source.display()
        )));
    }

    if let Some(skill) = current.take() {
        skills.push(finish(skill, &mut description_lines));
    }

    if skills.is_empty() {
        return Err(PlanError::parse(format!(
            "no skill definition found in {}",
            source.display()
        )));
    }

    Ok(skills)
}

fn untitled(source: &Path) -> Result<SkillDefinition> {
    let stem = source
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .ok_or_else(|| {
            PlanError::parse(format!("cannot name untitled skill in {}", source.display()))
        })?;
    Ok(SkillDefinition {
        name: stem.to_string(),
        ..SkillDefinition::default()
    })
}

fn finish(mut skill: SkillDefinition, description_lines: &mut Vec<String>) -> SkillDefinition {
    skill.description = description_lines.join(" ");
    description_lines.clear();
    skill
}

/// Content of a `-`, `*` or `N.` list item.
fn list_item(line: &str) -> Option<&str> {
    if let Some(rest) = line.strip_prefix("- ").or_else(|| line.strip_prefix("* ")) {
        return Some(rest.trim());
    }
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    line[digits..].strip_prefix(". ").map(str::trim)
}
