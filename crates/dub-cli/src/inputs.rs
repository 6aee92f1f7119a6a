//! Resolution of command-line inputs into source files.
//!
//! An input is a compilation database (`compile_commands.json`, or a
//! directory holding one), a directory to walk, or a single file. Results
//! keep first-seen order and each file appears once.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use camino::Utf8PathBuf;
use dub_syntax::SupportedLanguage;
use serde::Deserialize;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

use crate::errors::InputError;

/// File name clang tooling uses for compilation databases.
pub(crate) const COMPILE_COMMANDS: &str = "compile_commands.json";

/// Directory names never descended into.
const SKIPPED_DIRS: &[&str] = &["target", "node_modules"];

/// One translation unit of a compilation database. Keys other than
/// `directory` and `file` are ignored.
#[derive(Debug, Deserialize)]
struct CompileCommand {
    directory: Utf8PathBuf,
    file: Utf8PathBuf,
}

impl CompileCommand {
    fn source_path(self) -> PathBuf {
        if self.file.is_absolute() {
            self.file.into_std_path_buf()
        } else {
            self.directory.join(self.file).into_std_path_buf()
        }
    }
}

/// Sources in first-seen order. Files are identified by canonical path so
/// differently spelled paths to one file are kept once.
#[derive(Default)]
struct Sources {
    ordered: Vec<PathBuf>,
    seen: HashSet<PathBuf>,
}

impl Sources {
    fn push(&mut self, path: PathBuf) {
        let identity = fs::canonicalize(&path).unwrap_or_else(|_| path.clone());
        if self.seen.insert(identity) {
            self.ordered.push(path);
        } else {
            debug!(path = %path.display(), "skipping duplicate source");
        }
    }
}

/// Expands `inputs` into the supported source files to index.
pub(crate) fn collect_sources(inputs: &[PathBuf]) -> Result<Vec<PathBuf>, InputError> {
    let mut sources = Sources::default();
    for input in inputs {
        if !input.exists() {
            return Err(InputError::Missing {
                path: input.clone(),
            });
        }
        if is_database(input) {
            read_database(input, &mut sources)?;
        } else if input.is_dir() {
            let database = input.join(COMPILE_COMMANDS);
            if database.is_file() {
                read_database(&database, &mut sources)?;
            } else {
                walk_directory(input, &mut sources)?;
            }
        } else if SupportedLanguage::from_path(input).is_some() {
            sources.push(input.clone());
        } else {
            warn!(path = %input.display(), "unsupported file extension, skipping");
        }
    }
    Ok(sources.ordered)
}

fn is_database(path: &Path) -> bool {
    path.is_file() && path.file_name().is_some_and(|name| name == COMPILE_COMMANDS)
}

fn read_database(path: &Path, sources: &mut Sources) -> Result<(), InputError> {
    let text = fs::read_to_string(path).map_err(|source| InputError::ReadDatabase {
        path: path.to_path_buf(),
        source,
    })?;
    let commands: Vec<CompileCommand> =
        serde_json::from_str(&text).map_err(|source| InputError::ParseDatabase {
            path: path.to_path_buf(),
            source,
        })?;
    debug!(path = %path.display(), entries = commands.len(), "read compilation database");

    for command in commands {
        let file = command.source_path();
        if SupportedLanguage::from_path(&file).is_some() {
            sources.push(file);
        } else {
            warn!(path = %file.display(), "unsupported compilation database entry, skipping");
        }
    }
    Ok(())
}

fn walk_directory(root: &Path, sources: &mut Sources) -> Result<(), InputError> {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_skipped_dir(entry));
    for item in walker {
        let entry = item.map_err(|source| InputError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && SupportedLanguage::from_path(entry.path()).is_some() {
            sources.push(entry.into_path());
        }
    }
    Ok(())
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.') || SKIPPED_DIRS.contains(&name))
}
