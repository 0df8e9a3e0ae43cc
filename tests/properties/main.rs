//! Property tests for planfold invariants.

mod expansion_tests;
mod schema_tests;
