//! Loading skill definitions from markdown files

pub mod loader;
pub mod parser;

pub use loader::{is_skill_file, load_skills};
pub use parser::parse_skill_markdown;
