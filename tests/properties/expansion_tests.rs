use std::collections::HashMap;

use proptest::prelude::*;

use planfold::core::{
    SkillDefinition, SkillExpander, expand_skill_references, extract_placeholders,
    is_skill_reference, parse_skill_reference,
};

fn lookup(skills: &[(&str, &[&str])]) -> HashMap<String, SkillDefinition> {
    skills
        .iter()
        .map(|(name, lines)| ((*name).to_string(), SkillDefinition::new(*name, lines.iter().copied())))
        .collect()
}

proptest! {
    #[test]
    fn test_literal_lines_are_unchanged(lines in prop::collection::vec("[a-z0-9 {}._-]{0,24}", 0..12)) {
        let skills = lookup(&[("Build", &["make"])]);
        let expanded = expand_skill_references(&lines, &skills).unwrap();
        prop_assert_eq!(expanded, lines);
    }

    #[test]
    fn test_reference_roundtrip(name in "[A-Za-z][A-Za-z0-9 _-]{0,20}[A-Za-z0-9]", pad in 1usize..4) {
        let spaces = " ".repeat(pad);
        let line = format!("[{spaces}{name}{spaces}]");
        prop_assert!(is_skill_reference(&line));
        prop_assert_eq!(parse_skill_reference(&line), Some(name.as_str()));
    }

    #[test]
    fn test_unpadded_brackets_are_literal(name in "[A-Za-z0-9]{1,12}") {
        let line = format!("[{name}]");
        prop_assert!(!is_skill_reference(&line));
    }

    #[test]
    fn test_sibling_references_never_cycle(count in 1usize..8) {
        let skills = lookup(&[("Leaf", &["echo leaf"])]);
        let lines: Vec<String> = (0..count).map(|_| "[ Leaf ]".to_string()).collect();
        let expanded = SkillExpander::new(&skills).expand(&lines, &[]).unwrap();
        prop_assert_eq!(expanded.len(), count);
    }

    #[test]
    fn test_expansion_is_deterministic(count in 0usize..6) {
        let skills = lookup(&[("A", &["[ B ]", "a"]), ("B", &["b1", "b2"])]);
        let lines: Vec<String> = (0..count).map(|i| if i % 2 == 0 { "[ A ]".into() } else { format!("x{i}") }).collect();
        let first = expand_skill_references(&lines, &skills).unwrap();
        let second = expand_skill_references(&lines, &skills).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_placeholders_without_dot_are_ignored(key in "[A-Za-z0-9_-]{1,16}") {
        let line = format!("run {{{key}}}");
        prop_assert!(extract_placeholders(&line).is_empty());
    }
}
