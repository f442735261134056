//! Small helpers shared across CLI tests.

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use tempfile::TempDir;

use super::{Cli, CliError, ExecutionSummary, run_cli};

pub(super) fn temp_dir() -> TempDir {
    match TempDir::new() {
        Ok(dir) => dir,
        Err(err) => panic!("failed to create temp dir: {err}"),
    }
}

pub(super) fn create_text_file(dir: &TempDir, name: &str, contents: &str) -> io::Result<PathBuf> {
    let path = dir.path().join(name);
    let mut file = File::create(&path)?;
    file.write_all(contents.as_bytes())?;
    Ok(path)
}

pub(super) fn parse(args: &[&str]) -> Cli {
    let argv = std::iter::once("scalefree").chain(args.iter().copied());
    match Cli::try_parse_from(argv) {
        Ok(cli) => cli,
        Err(err) => panic!("arguments must parse: {err}"),
    }
}

pub(super) fn run_args(args: &[&str]) -> Result<ExecutionSummary, CliError> {
    run_cli(parse(args))
}

pub(super) fn run_args_expecting_error(args: &[&str], panic_msg: &str) -> CliError {
    match run_args(args) {
        Ok(_) => panic!("{panic_msg}"),
        Err(err) => err,
    }
}
