//! Skill registry for one resolution pass

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::capability::{Capability, Origin};
use super::expansion::{SkillExpander, parse_skill_reference};
use super::skill::SkillDefinition;

/// Name → definition source consulted by the expander.
pub trait SkillLookup {
    fn lookup(&self, name: &str) -> Option<&SkillDefinition>;
}

impl SkillLookup for HashMap<String, SkillDefinition> {
    fn lookup(&self, name: &str) -> Option<&SkillDefinition> {
        self.get(name)
    }
}

/// Owns the skills loaded for one plan resolution.
#[derive(Debug, Default, Clone)]
pub struct SkillRegistry {
    skills: HashMap<String, SkillDefinition>,
}

impl SkillRegistry {
    /// Build from parsed records. A later record with a duplicate name
    /// replaces the earlier one.
    #[must_use]
    pub fn new(definitions: Vec<SkillDefinition>) -> Self {
        let mut skills = HashMap::with_capacity(definitions.len());
        for definition in definitions {
            let name = definition.name.clone();
            if skills.insert(name.clone(), definition).is_some() {
                debug!(skill = %name, "duplicate skill name, later definition wins");
            }
        }
        Self { skills }
    }

    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&SkillDefinition> {
        self.skills.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.skills.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.skills.is_empty()
    }

    /// Skill names in sorted order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.skills.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillDefinition> {
        self.skills.values()
    }

    /// One capability per skill, sorted by name. Skills that other skills
    /// reference are `Indirect`; skills whose expansion fails are incomplete.
    #[must_use]
    pub fn capabilities(&self) -> Vec<Capability> {
        let referenced: HashSet<&str> = self
            .skills
            .values()
            .flat_map(|skill| {
                skill
                    .execution
                    .iter()
                    .filter_map(|line| parse_skill_reference(line))
                    .filter(move |name| *name != skill.name)
            })
            .collect();

        let expander = SkillExpander::new(self);
        self.names()
            .into_iter()
            .filter_map(|name| self.lookup(name))
            .map(|skill| {
                let origin = if referenced.contains(skill.name.as_str()) {
                    Origin::Indirect
                } else {
                    Origin::UserProvided
                };
                let incomplete =
                    skill.execution.is_empty() || expander.expand_skill(&skill.name).is_err();
                Capability {
                    name: skill.name.clone(),
                    description: skill.description.clone(),
                    origin,
                    is_incomplete: Some(incomplete),
                }
            })
            .collect()
    }
}

impl SkillLookup for SkillRegistry {
    fn lookup(&self, name: &str) -> Option<&SkillDefinition> {
        Self::lookup(self, name)
    }
}

impl FromIterator<SkillDefinition> for SkillRegistry {
    fn from_iter<T: IntoIterator<Item = SkillDefinition>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_new_is_empty() {
        let registry = SkillRegistry::new(vec![]);
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.lookup("anything").is_none());
    }

    #[test]
    fn lookup_by_exact_name() {
        let registry = SkillRegistry::new(vec![SkillDefinition::new("Build Alpha", ["make"])]);
        assert!(registry.lookup("Build Alpha").is_some());
        assert!(registry.lookup("build alpha").is_none());
    }

    #[test]
    fn duplicate_names_last_write_wins() {
        let registry = SkillRegistry::new(vec![
            SkillDefinition::new("Deploy", ["old"]),
            SkillDefinition::new("Deploy", ["new"]),
        ]);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lookup("Deploy").unwrap().execution, vec!["new"]);
    }

    #[test]
    fn names_are_sorted() {
        let registry: SkillRegistry = ["b", "c", "a"]
            .into_iter()
            .map(|name| SkillDefinition::new(name, ["x"]))
            .collect();
        assert_eq!(registry.names(), vec!["a", "b", "c"]);
    }

    #[test]
    fn capabilities_mark_origin_and_completeness() {
        let registry = SkillRegistry::new(vec![
            SkillDefinition::new("Release", ["[ Build ]", "git tag"]).with_description("Cut a release"),
            SkillDefinition::new("Build", ["cargo build"]),
            SkillDefinition::new("Broken", ["[ Missing ]"]),
            SkillDefinition::new("Empty", Vec::<String>::new()),
        ]);

        let caps = registry.capabilities();
        let by_name = |name: &str| caps.iter().find(|cap| cap.name == name).unwrap();

        assert_eq!(by_name("Release").origin, Origin::UserProvided);
        assert_eq!(by_name("Release").description, "Cut a release");
        assert_eq!(by_name("Release").is_incomplete, Some(false));
        assert_eq!(by_name("Build").origin, Origin::Indirect);
        assert_eq!(by_name("Broken").is_incomplete, Some(true));
        assert_eq!(by_name("Empty").is_incomplete, Some(true));
    }
}
