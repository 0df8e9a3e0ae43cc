use std::path::PathBuf;

use clap::Parser;

use planfold::cli::commands::skills::SkillsCommand;
use planfold::cli::{Cli, Commands};

fn parse(args: &[&str]) -> Cli {
    let mut argv = vec!["planfold"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv)
}

#[test]
fn parse_resolve_strict() {
    let cli = parse(&["resolve", "plan.json", "--strict"]);
    match cli.command {
        Commands::Resolve(args) => {
            assert_eq!(args.plan, PathBuf::from("plan.json"));
            assert!(args.strict);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_global_flags_after_subcommand() {
    let cli = parse(&[
        "validate",
        "plan.json",
        "--robot",
        "-vv",
        "--skills",
        "a",
        "--skills",
        "b",
        "--store",
        "store.toml",
    ]);
    assert!(cli.robot);
    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.skills, vec![PathBuf::from("a"), PathBuf::from("b")]);
    assert_eq!(cli.store, Some(PathBuf::from("store.toml")));
    assert!(matches!(cli.command, Commands::Validate(_)));
}

#[test]
fn parse_refs_docs() {
    match parse(&["refs", "Build Alpha", "--docs"]).command {
        Commands::Refs(args) => {
            assert_eq!(args.target, "Build Alpha");
            assert!(args.docs);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_skills_subcommands() {
    match parse(&["skills", "list", "--builtin"]).command {
        Commands::Skills(args) => {
            assert!(matches!(args.command, SkillsCommand::List { builtin: true }));
        }
        other => panic!("unexpected command: {other:?}"),
    }
    match parse(&["skills", "check"]).command {
        Commands::Skills(args) => assert!(matches!(args.command, SkillsCommand::Check)),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn missing_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["planfold"]).is_err());
    assert!(Cli::try_parse_from(["planfold", "expand"]).is_err());
}
