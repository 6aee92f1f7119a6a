//! Entry point of the `dub` call mapper.
//!
//! The binary delegates to [`dub_cli::run`], which loads configuration,
//! indexes the given inputs, and writes the rendered call graph to standard
//! output.

use std::io::{self, StderrLock, StdoutLock};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout: StdoutLock<'_> = io::stdout().lock();
    let mut stderr: StderrLock<'_> = io::stderr().lock();
    dub_cli::run(std::env::args_os(), &mut stdout, &mut stderr)
}
