//! Recursion bounds for untrusted plans and skill graphs

use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_TREE_DEPTH: usize = 64;
pub const DEFAULT_MAX_EXPANSION_DEPTH: usize = 32;
pub const DEFAULT_MAX_EXPANDED_LINES: usize = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Limits {
    /// Deepest task nesting the validator accepts (root is depth 1).
    pub max_tree_depth: usize,
    /// Longest chain of distinct nested skill references.
    pub max_expansion_depth: usize,
    /// Most lines a single expansion may produce, so wide fan-out fails
    /// before it exhausts memory.
    pub max_expanded_lines: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_tree_depth: DEFAULT_MAX_TREE_DEPTH,
            max_expansion_depth: DEFAULT_MAX_EXPANSION_DEPTH,
            max_expanded_lines: DEFAULT_MAX_EXPANDED_LINES,
        }
    }
}
