//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Maps which function calls which across a source tree.
///
/// Configuration flags (`--config-path`, `--log-filter`, `--log-format`,
/// `--format`) must precede the inputs.
#[derive(Parser, Debug)]
#[command(name = "dub", version, about)]
pub(crate) struct Cli {
    /// Source files, directories, or `compile_commands.json` databases.
    #[arg(value_name = "INPUT", required = true, num_args = 1..)]
    pub(crate) inputs: Vec<PathBuf>,
}
