//! Unit tests against the public planfold API.

mod cli_command_parse_tests;
mod pipeline_tests;
