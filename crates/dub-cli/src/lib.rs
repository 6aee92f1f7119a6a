//! Command-line runtime for the dub call mapper.
//!
//! The runtime splits configuration flags from inputs, loads configuration,
//! installs logging, resolves inputs into source files, indexes them into a
//! single call graph, and renders the graph to standard output. IO streams
//! and the configuration loader are injectable so tests can drive the whole
//! pipeline in memory.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use dub_syntax::CallGraph;
use tracing::{error, info};

mod cli;
mod config;
mod errors;
mod inputs;
mod render;
mod telemetry;

use cli::Cli;
use config::{ConfigLoader, OrthoConfigLoader, split_config_arguments};
pub(crate) use errors::{AppError, SourceError};

/// CLI flags recognised by the configuration loader.
///
/// Keep in sync with the fields of `dub_config::Config`.
const CONFIG_CLI_FLAGS: &[&str] = &["--config-path", "--log-filter", "--log-format", "--format"];

/// Runs the CLI with the given arguments and IO handles.
#[must_use]
pub fn run<I, W, E>(args: I, stdout: &mut W, stderr: &mut E) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
{
    run_with_loader(args, stdout, stderr, &OrthoConfigLoader)
}

pub(crate) fn run_with_loader<I, W, E, L>(
    args: I,
    stdout: &mut W,
    stderr: &mut E,
    loader: &L,
) -> ExitCode
where
    I: IntoIterator<Item = OsString>,
    W: Write,
    E: Write,
    L: ConfigLoader,
{
    let arguments: Vec<OsString> = args.into_iter().collect();
    match execute(&arguments, stdout, loader) {
        Ok(()) => ExitCode::SUCCESS,
        // `--help` and `--version` arrive as clap errors aimed at stdout.
        Err(AppError::CliUsage(usage)) if !usage.use_stderr() => {
            match write!(stdout, "{usage}") {
                Ok(()) => ExitCode::SUCCESS,
                Err(_) => ExitCode::FAILURE,
            }
        }
        Err(failure) => {
            writeln!(stderr, "dub: {failure}").ok();
            ExitCode::FAILURE
        }
    }
}

fn execute<W, L>(args: &[OsString], stdout: &mut W, loader: &L) -> Result<(), AppError>
where
    W: Write,
    L: ConfigLoader,
{
    let split = split_config_arguments(args);
    let cli = Cli::try_parse_from(&split.command_arguments).map_err(AppError::CliUsage)?;
    let config = loader.load(&split.config_arguments)?;
    telemetry::initialise(&config)?;

    let sources = inputs::collect_sources(&cli.inputs)?;
    if sources.is_empty() {
        return Err(AppError::NoSources);
    }
    let graph = index_sources(&sources)?;

    render::render(config.format(), &graph, stdout).map_err(AppError::Render)?;
    stdout.flush().map_err(AppError::Render)
}

/// Indexes every source into one graph, skipping files that fail.
fn index_sources(sources: &[PathBuf]) -> Result<CallGraph, AppError> {
    let mut graph = CallGraph::new();
    for path in sources {
        if let Err(failure) = index_file(&mut graph, path) {
            error!(path = %path.display(), %failure, "skipping source");
        }
    }
    if graph.files_indexed() == 0 {
        return Err(AppError::NothingIndexed(sources.len()));
    }
    info!(
        files = graph.files_indexed(),
        skipped = sources.len().saturating_sub(graph.files_indexed()),
        callers = graph.calls().caller_count(),
        edges = graph.calls().edge_count(),
        "indexed sources"
    );
    Ok(graph)
}

fn index_file(graph: &mut CallGraph, path: &Path) -> Result<(), SourceError> {
    let bytes = fs::read(path).map_err(SourceError::Read)?;
    graph.index_source(path, &String::from_utf8_lossy(&bytes))?;
    Ok(())
}
