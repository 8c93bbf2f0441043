//! CLI parse tests.

use super::{Cli, CliCommand, ReleaseArgs};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

pub(super) fn release_flags() -> Vec<String> {
    let mut args = vec!["--release-version".to_string(), "1.2.3".to_string()];
    for (flag, c) in [
        ("--sha-macos-arm64", 'a'),
        ("--sha-macos-x64", 'b'),
        ("--sha-linux-arm64", 'c'),
        ("--sha-linux-x64", 'd'),
    ] {
        args.push(flag.to_string());
        args.push(c.to_string().repeat(64));
    }
    args
}

pub(super) fn parse_release(subcommand: &str, extra: &[&str]) -> ReleaseArgs {
    let flags = release_flags();
    let mut args = vec!["brewgen", subcommand];
    args.extend(flags.iter().map(String::as_str));
    args.extend_from_slice(extra);
    match parse(&args) {
        CliCommand::Generate { release }
        | CliCommand::Render { release }
        | CliCommand::Verify { release } => release,
        other => panic!("expected a release command, got {other:?}"),
    }
}
