//! planfold - validate LLM task plans, expand skill references, and find
//! the configuration a plan still needs.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod skills;
pub mod store;
pub mod test_utils;

pub use error::{ErrorCode, PlanError, Result};
