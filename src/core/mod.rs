//! Plan validation, skill expansion and requirement discovery

pub mod capability;
pub mod expansion;
pub mod limits;
pub mod plan;
pub mod registry;
pub mod requirements;
pub mod schema;
pub mod skill;
pub mod task;

pub use capability::{Capability, Origin, builtin_capabilities};
pub use expansion::{
    SkillExpander, expand_skill_references, is_skill_reference, parse_skill_reference,
    referenced_skills, render_skill_docs, validate_no_cycles,
};
pub use limits::Limits;
pub use plan::{ExecutionStep, PlanResolver, ResolvedPlan};
pub use registry::{SkillLookup, SkillRegistry};
pub use requirements::{
    ConfigRequirement, FlatConfig, RequirementReport, RequirementResolver, extract_placeholders,
    flatten_config, has_config_value,
};
pub use schema::{SchemaValidator, validate_plan, validate_task};
pub use skill::SkillDefinition;
pub use task::{ScheduledTask, Task, TaskNode, TaskType, classify, is_group, is_task, leaves};
