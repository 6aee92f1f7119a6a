//! Error types for the CLI runtime.

use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use dub_syntax::SyntaxError;
use thiserror::Error;

use crate::telemetry::TelemetryError;

#[derive(Debug, Error)]
pub(crate) enum AppError {
    #[error("failed to load configuration: {0}")]
    LoadConfiguration(Arc<ortho_config::OrthoError>),
    #[error("{0}")]
    CliUsage(clap::Error),
    #[error(transparent)]
    Telemetry(#[from] TelemetryError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error("no supported source files found in the given inputs")]
    NoSources,
    #[error("none of the {0} source files could be indexed")]
    NothingIndexed(usize),
    #[error("failed to write output: {0}")]
    Render(io::Error),
}

/// Problems locating the files to index.
#[derive(Debug, Error)]
pub(crate) enum InputError {
    #[error("input does not exist: {}", path.display())]
    Missing { path: PathBuf },
    #[error("failed to walk {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("failed to read compilation database {}: {source}", path.display())]
    ReadDatabase { path: PathBuf, source: io::Error },
    #[error("malformed compilation database {}: {source}", path.display())]
    ParseDatabase {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// Reasons a single source file is skipped.
#[derive(Debug, Error)]
pub(crate) enum SourceError {
    #[error("failed to read source: {0}")]
    Read(io::Error),
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
}
