//! Skill reference expansion
//!
//! A line of the form `[ Name ]` (whitespace required inside both brackets)
//! stands for the execution lines of skill `Name`. Expansion replaces every
//! such line in place, depth-first, until only literal lines remain.
//!
//! The visited chain is the list of skill names on the current branch's
//! ancestor path. Each recursive call gets its own extended copy, so two
//! sibling references to the same skill never look like a cycle.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;
use tracing::trace;

use super::limits::Limits;
use super::registry::{SkillLookup, SkillRegistry};
use crate::error::{ErrorCode, PlanError, Result};

static SKILL_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\[\s+(\S(?:.*\S)?)\s+\]$").expect("skill reference pattern is valid")
});

/// Name referenced by `line`, if it is a skill reference line.
#[must_use]
pub fn parse_skill_reference(line: &str) -> Option<&str> {
    SKILL_REFERENCE
        .captures(line.trim())
        .and_then(|caps| caps.get(1))
        .map(|name| name.as_str())
}

#[must_use]
pub fn is_skill_reference(line: &str) -> bool {
    parse_skill_reference(line).is_some()
}

/// Expand `lines` against `lookup` with an empty visited chain.
pub fn expand_skill_references<L>(lines: &[String], lookup: &L) -> Result<Vec<String>>
where
    L: SkillLookup + ?Sized,
{
    SkillExpander::new(lookup).expand(lines, &[])
}

/// Transitive set of registered skills referenced from `lines`.
#[must_use]
pub fn referenced_skills<L>(lines: &[String], lookup: &L) -> BTreeSet<String>
where
    L: SkillLookup + ?Sized,
{
    SkillExpander::new(lookup).referenced_skills(lines, &[])
}

pub struct SkillExpander<'a, L: ?Sized> {
    lookup: &'a L,
    max_depth: usize,
    max_lines: usize,
}

impl<'a, L> SkillExpander<'a, L>
where
    L: SkillLookup + ?Sized,
{
    pub fn new(lookup: &'a L) -> Self {
        Self {
            lookup,
            max_depth: Limits::default().max_expansion_depth,
            max_lines: Limits::default().max_expanded_lines,
        }
    }

    #[must_use]
    pub const fn with_limits(mut self, limits: Limits) -> Self {
        self.max_depth = limits.max_expansion_depth;
        self.max_lines = limits.max_expanded_lines;
        self
    }

    /// Expand every reference in `lines`, failing on cycles, unknown
    /// skills, chains deeper than the configured limit, or output longer
    /// than the line budget.
    pub fn expand(&self, lines: &[String], visited: &[String]) -> Result<Vec<String>> {
        let mut out = Vec::with_capacity(lines.len());
        for line in lines {
            let Some(name) = parse_skill_reference(line) else {
                out.push(line.clone());
                self.check_budget(out.len())?;
                continue;
            };

            if visited.iter().any(|seen| seen == name) {
                let mut chain = visited.to_vec();
                chain.push(name.to_string());
                return Err(PlanError::circular_reference(&chain));
            }

            let skill = self
                .lookup
                .lookup(name)
                .ok_or_else(|| PlanError::skill_not_found(name))?;

            if visited.len() >= self.max_depth {
                return Err(PlanError::invalid_state(format!(
                    "Skill expansion exceeded maximum depth of {} at `{name}`",
                    self.max_depth
                )));
            }

            let mut branch = visited.to_vec();
            branch.push(name.to_string());
            trace!(skill = name, depth = branch.len(), "expanding skill reference");
            out.extend(self.expand(&skill.execution, &branch)?);
            self.check_budget(out.len())?;
        }
        Ok(out)
    }

    fn check_budget(&self, produced: usize) -> Result<()> {
        if produced > self.max_lines {
            return Err(PlanError::invalid_state(format!(
                "Skill expansion exceeded the budget of {} lines",
                self.max_lines
            )));
        }
        Ok(())
    }

    /// Expand the execution of skill `name`, with `name` on the chain.
    pub fn expand_skill(&self, name: &str) -> Result<Vec<String>> {
        let skill = self
            .lookup
            .lookup(name)
            .ok_or_else(|| PlanError::skill_not_found(name))?;
        self.expand(&skill.execution, &[name.to_string()])
    }

    /// Registered skill names reachable from `lines`. Never fails: a name
    /// already on the chain or missing from the lookup ends that branch.
    #[must_use]
    pub fn referenced_skills(&self, lines: &[String], visited: &[String]) -> BTreeSet<String> {
        let mut found = BTreeSet::new();
        self.collect_references(lines, visited, &mut found);
        found
    }

    fn collect_references(&self, lines: &[String], visited: &[String], found: &mut BTreeSet<String>) {
        for name in lines.iter().filter_map(|line| parse_skill_reference(line)) {
            if visited.iter().any(|seen| seen == name) || found.contains(name) {
                continue;
            }
            let Some(skill) = self.lookup.lookup(name) else {
                continue;
            };
            found.insert(name.to_string());

            let mut branch = visited.to_vec();
            branch.push(name.to_string());
            self.collect_references(&skill.execution, &branch, found);
        }
    }
}

/// One `CircularReference` error per skill whose expansion cycles within
/// `limits`.
#[must_use]
pub fn validate_no_cycles(registry: &SkillRegistry, limits: Limits) -> Vec<PlanError> {
    let expander = SkillExpander::new(registry).with_limits(limits);
    registry
        .names()
        .into_iter()
        .filter_map(|name| expander.expand_skill(name).err())
        .filter(|err| err.code == ErrorCode::CircularReference)
        .collect()
}

/// Markdown documentation for the given skills, in name order.
#[must_use]
pub fn render_skill_docs<L>(names: &BTreeSet<String>, lookup: &L) -> String
where
    L: SkillLookup + ?Sized,
{
    let mut out = String::new();
    for skill in names.iter().filter_map(|name| lookup.lookup(name)) {
        out.push_str(&format!("### {}\n", skill.name));
        if !skill.description.is_empty() {
            out.push_str(&format!("{}\n", skill.description));
        }
        for (idx, step) in skill.steps.iter().enumerate() {
            out.push_str(&format!("{}. {step}\n", idx + 1));
        }
        out.push('\n');
    }
    out
}
